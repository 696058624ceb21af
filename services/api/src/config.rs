use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingVar(String),
    #[error("Invalid value for environment variable {0}: {1}")]
    InvalidValue(String, String),
}

const TTS_VOICES: &[&str] = &[
    "alloy", "ash", "ballad", "coral", "echo", "fable", "onyx", "nova", "sage", "shimmer",
];

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub openai_api_key: String,
    pub openai_api_base: String,
    pub chat_model: String,
    pub tts_model: String,
    pub tts_voice: String,
    pub log_level: Level,
    /// Directory of `.md` files overriding the compiled-in prompt templates.
    pub prompts_path: Option<PathBuf>,
    /// JSON file replacing the compiled-in student profile.
    pub profile_path: Option<PathBuf>,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        let bind_address_str =
            std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:5000".to_string());
        let bind_address = bind_address_str
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string()))?;

        let openai_api_key = std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingVar("OPENAI_API_KEY".to_string()))?;

        let openai_api_base = std::env::var("OPENAI_API_BASE")
            .unwrap_or_else(|_| "https://api.openai.com/v1".to_string());

        let chat_model = std::env::var("CHAT_MODEL").unwrap_or_else(|_| "gpt-4".to_string());
        let tts_model = std::env::var("TTS_MODEL").unwrap_or_else(|_| "tts-1".to_string());

        let tts_voice = std::env::var("TTS_VOICE")
            .unwrap_or_else(|_| "nova".to_string())
            .to_lowercase();
        if !TTS_VOICES.contains(&tts_voice.as_str()) {
            return Err(ConfigError::InvalidValue(
                "TTS_VOICE".to_string(),
                format!("'{}' is not one of {}", tts_voice, TTS_VOICES.join(", ")),
            ));
        }

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let prompts_path = std::env::var("PROMPTS_PATH").ok().map(PathBuf::from);
        let profile_path = std::env::var("PROFILE_PATH").ok().map(PathBuf::from);

        Ok(Self {
            bind_address,
            openai_api_key,
            openai_api_base,
            chat_model,
            tts_model,
            tts_voice,
            log_level,
            prompts_path,
            profile_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;
    use tracing::Level;

    fn clear_env_vars() {
        unsafe {
            env::remove_var("BIND_ADDRESS");
            env::remove_var("OPENAI_API_KEY");
            env::remove_var("OPENAI_API_BASE");
            env::remove_var("CHAT_MODEL");
            env::remove_var("TTS_MODEL");
            env::remove_var("TTS_VOICE");
            env::remove_var("RUST_LOG");
            env::remove_var("PROMPTS_PATH");
            env::remove_var("PROFILE_PATH");
        }
    }

    fn set_minimal_env() {
        unsafe {
            env::set_var("OPENAI_API_KEY", "test-openai-key");
        }
    }

    #[test]
    fn test_config_error_display() {
        let missing_var = ConfigError::MissingVar("TEST_VAR".to_string());
        assert_eq!(
            format!("{}", missing_var),
            "Missing environment variable: TEST_VAR"
        );

        let invalid_value =
            ConfigError::InvalidValue("TEST_VAR".to_string(), "bad_value".to_string());
        assert_eq!(
            format!("{}", invalid_value),
            "Invalid value for environment variable TEST_VAR: bad_value"
        );
    }

    #[test]
    #[serial]
    fn test_config_from_env_minimal() {
        clear_env_vars();
        set_minimal_env();

        let config = Config::from_env().expect("Config should load successfully");

        assert_eq!(config.bind_address.to_string(), "0.0.0.0:5000");
        assert_eq!(config.openai_api_key, "test-openai-key");
        assert_eq!(config.openai_api_base, "https://api.openai.com/v1");
        assert_eq!(config.chat_model, "gpt-4");
        assert_eq!(config.tts_model, "tts-1");
        assert_eq!(config.tts_voice, "nova");
        assert_eq!(config.log_level, Level::INFO);
        assert_eq!(config.prompts_path, None);
        assert_eq!(config.profile_path, None);
    }

    #[test]
    #[serial]
    fn test_config_from_env_custom_values() {
        clear_env_vars();
        unsafe {
            env::set_var("BIND_ADDRESS", "127.0.0.1:8080");
            env::set_var("OPENAI_API_KEY", "custom-openai-key");
            env::set_var("OPENAI_API_BASE", "http://localhost:11434/v1");
            env::set_var("CHAT_MODEL", "gpt-4o-mini");
            env::set_var("TTS_MODEL", "tts-1-hd");
            env::set_var("TTS_VOICE", "Shimmer");
            env::set_var("RUST_LOG", "debug");
            env::set_var("PROMPTS_PATH", "/custom/prompts");
            env::set_var("PROFILE_PATH", "/custom/profile.json");
        }

        let config = Config::from_env().expect("Config should load successfully");

        assert_eq!(config.bind_address.to_string(), "127.0.0.1:8080");
        assert_eq!(config.openai_api_key, "custom-openai-key");
        assert_eq!(config.openai_api_base, "http://localhost:11434/v1");
        assert_eq!(config.chat_model, "gpt-4o-mini");
        assert_eq!(config.tts_model, "tts-1-hd");
        assert_eq!(config.tts_voice, "shimmer");
        assert_eq!(config.log_level, Level::DEBUG);
        assert_eq!(config.prompts_path, Some(PathBuf::from("/custom/prompts")));
        assert_eq!(
            config.profile_path,
            Some(PathBuf::from("/custom/profile.json"))
        );
    }

    #[test]
    #[serial]
    fn test_config_missing_openai_key() {
        clear_env_vars();

        let err = Config::from_env().unwrap_err();
        match err {
            ConfigError::MissingVar(msg) => assert!(msg.contains("OPENAI_API_KEY")),
            _ => panic!("Expected MissingVar for OPENAI_API_KEY"),
        }
    }

    #[test]
    #[serial]
    fn test_config_blank_openai_key_is_missing() {
        clear_env_vars();
        unsafe {
            env::set_var("OPENAI_API_KEY", "   ");
        }

        assert!(matches!(
            Config::from_env().unwrap_err(),
            ConfigError::MissingVar(_)
        ));
    }

    #[test]
    #[serial]
    fn test_config_invalid_bind_address() {
        clear_env_vars();
        set_minimal_env();
        unsafe {
            env::set_var("BIND_ADDRESS", "not-a-valid-address");
        }

        let err = Config::from_env().unwrap_err();
        match err {
            ConfigError::InvalidValue(var, _) => assert_eq!(var, "BIND_ADDRESS"),
            _ => panic!("Expected InvalidValue for BIND_ADDRESS"),
        }
    }

    #[test]
    #[serial]
    fn test_config_invalid_log_level() {
        clear_env_vars();
        set_minimal_env();
        unsafe {
            env::set_var("RUST_LOG", "not-a-level");
        }

        let err = Config::from_env().unwrap_err();
        match err {
            ConfigError::InvalidValue(var, _) => assert_eq!(var, "RUST_LOG"),
            _ => panic!("Expected InvalidValue for RUST_LOG"),
        }
    }

    #[test]
    #[serial]
    fn test_config_invalid_tts_voice() {
        clear_env_vars();
        set_minimal_env();
        unsafe {
            env::set_var("TTS_VOICE", "robot");
        }

        let err = Config::from_env().unwrap_err();
        match err {
            ConfigError::InvalidValue(var, msg) => {
                assert_eq!(var, "TTS_VOICE");
                assert!(msg.contains("robot"));
            }
            _ => panic!("Expected InvalidValue for TTS_VOICE"),
        }
    }

    #[test]
    #[serial]
    fn test_config_accepts_every_sdk_voice() {
        clear_env_vars();
        set_minimal_env();
        for voice in TTS_VOICES {
            unsafe {
                env::set_var("TTS_VOICE", voice);
            }
            let config = Config::from_env().unwrap();
            assert_eq!(config.tts_voice, *voice);
        }
    }
}
