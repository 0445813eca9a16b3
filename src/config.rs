#[derive(Debug, Clone)]
pub struct Config {
    /// Bot token, sent in the IDENTIFY payload and on every REST call.
    pub token: String,
    /// Base URL of the REST API (no trailing slash).
    pub api_url: String,
    /// Literal prefix a chat message must start with to be a command.
    pub command_prefix: String,
    /// The bot's own display name, used to suppress echoes of its messages.
    pub bot_username: String,
    /// The bot's own user id. When set, echo suppression keys off the id
    /// instead of the (spoofable) username.
    pub bot_user_id: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            token: std::env::var("TOKEN").expect("TOKEN is required"),
            api_url: std::env::var("RUNEBOT_API_URL")
                .unwrap_or_else(|_| "https://discordapp.com/api".to_string()),
            command_prefix: std::env::var("RUNEBOT_PREFIX")
                .unwrap_or_else(|_| "!rune".to_string())
                .to_lowercase(),
            bot_username: std::env::var("RUNEBOT_USERNAME")
                .unwrap_or_else(|_| "LeagueRuneBot".to_string()),
            bot_user_id: std::env::var("RUNEBOT_USER_ID").ok(),
        }
    }
}
