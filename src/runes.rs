use serde::Serialize;
use serde_json::Value;

/// The most-used rune page for one champion: a primary style with a
/// keystone and three minor runes, plus a secondary style with two.
#[derive(Debug, Clone, Serialize)]
pub struct RunePage {
    pub champion: &'static str,
    pub primary_style: &'static str,
    pub keystone: &'static str,
    pub primary: [&'static str; 3],
    pub secondary_style: &'static str,
    pub secondary: [&'static str; 2],
}

#[derive(Debug, Serialize)]
struct Embed {
    title: String,
    fields: Vec<EmbedField>,
}

#[derive(Debug, Serialize)]
struct EmbedField {
    name: String,
    value: String,
    inline: bool,
}

impl RunePage {
    /// Render the page as a message embed, one field per rune style.
    pub fn embed(&self) -> Value {
        let embed = Embed {
            title: format!("{} — most used runes", self.champion),
            fields: vec![
                EmbedField {
                    name: self.primary_style.to_string(),
                    value: format!("{}\n{}", self.keystone, self.primary.join("\n")),
                    inline: true,
                },
                EmbedField {
                    name: self.secondary_style.to_string(),
                    value: self.secondary.join("\n"),
                    inline: true,
                },
            ],
        };
        serde_json::to_value(embed).unwrap_or(Value::Null)
    }
}

/// Static champion → rune-page table the command layer consults. Lookups
/// are keyed by the lowercased single-word champion token from chat.
pub struct RuneBook {
    pages: Vec<RunePage>,
}

impl RuneBook {
    pub fn new() -> Self {
        Self { pages: PAGES.to_vec() }
    }

    pub fn champions(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.pages.iter().map(|p| p.champion)
    }

    pub fn page(&self, champion: &str) -> Option<&RunePage> {
        self.pages.iter().find(|p| p.champion == champion)
    }
}

impl Default for RuneBook {
    fn default() -> Self {
        Self::new()
    }
}

const PAGES: &[RunePage] = &[
    RunePage {
        champion: "ahri",
        primary_style: "Domination",
        keystone: "Electrocute",
        primary: ["Sudden Impact", "Eyeball Collection", "Ravenous Hunter"],
        secondary_style: "Sorcery",
        secondary: ["Manaflow Band", "Scorch"],
    },
    RunePage {
        champion: "lux",
        primary_style: "Sorcery",
        keystone: "Arcane Comet",
        primary: ["Manaflow Band", "Transcendence", "Scorch"],
        secondary_style: "Inspiration",
        secondary: ["Biscuit Delivery", "Cosmic Insight"],
    },
    RunePage {
        champion: "zed",
        primary_style: "Domination",
        keystone: "Electrocute",
        primary: ["Sudden Impact", "Eyeball Collection", "Relentless Hunter"],
        secondary_style: "Precision",
        secondary: ["Coup de Grace", "Presence of Mind"],
    },
    RunePage {
        champion: "yasuo",
        primary_style: "Precision",
        keystone: "Conqueror",
        primary: ["Triumph", "Legend: Alacrity", "Last Stand"],
        secondary_style: "Resolve",
        secondary: ["Bone Plating", "Second Wind"],
    },
    RunePage {
        champion: "garen",
        primary_style: "Precision",
        keystone: "Conqueror",
        primary: ["Triumph", "Legend: Tenacity", "Last Stand"],
        secondary_style: "Sorcery",
        secondary: ["Nimbus Cloak", "Celerity"],
    },
    RunePage {
        champion: "ashe",
        primary_style: "Precision",
        keystone: "Lethal Tempo",
        primary: ["Presence of Mind", "Legend: Alacrity", "Coup de Grace"],
        secondary_style: "Inspiration",
        secondary: ["Magical Footwear", "Biscuit Delivery"],
    },
    RunePage {
        champion: "darius",
        primary_style: "Precision",
        keystone: "Conqueror",
        primary: ["Triumph", "Legend: Tenacity", "Last Stand"],
        secondary_style: "Resolve",
        secondary: ["Second Wind", "Unflinching"],
    },
    RunePage {
        champion: "jinx",
        primary_style: "Precision",
        keystone: "Lethal Tempo",
        primary: ["Triumph", "Legend: Alacrity", "Coup de Grace"],
        secondary_style: "Domination",
        secondary: ["Taste of Blood", "Treasure Hunter"],
    },
    RunePage {
        champion: "thresh",
        primary_style: "Resolve",
        keystone: "Aftershock",
        primary: ["Font of Life", "Bone Plating", "Unflinching"],
        secondary_style: "Inspiration",
        secondary: ["Hextech Flashtraption", "Cosmic Insight"],
    },
    RunePage {
        champion: "ekko",
        primary_style: "Domination",
        keystone: "Dark Harvest",
        primary: ["Sudden Impact", "Eyeball Collection", "Ravenous Hunter"],
        secondary_style: "Sorcery",
        secondary: ["Transcendence", "Gathering Storm"],
    },
    RunePage {
        champion: "katarina",
        primary_style: "Domination",
        keystone: "Electrocute",
        primary: ["Sudden Impact", "Eyeball Collection", "Ravenous Hunter"],
        secondary_style: "Precision",
        secondary: ["Triumph", "Coup de Grace"],
    },
    RunePage {
        champion: "malphite",
        primary_style: "Resolve",
        keystone: "Grasp of the Undying",
        primary: ["Shield Bash", "Bone Plating", "Unflinching"],
        secondary_style: "Sorcery",
        secondary: ["Manaflow Band", "Scorch"],
    },
];
