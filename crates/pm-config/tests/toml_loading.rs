//! Integration tests for TOML configuration loading.

use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};
use pm_config::PmConfig;
use pretty_assertions::assert_eq;

#[test]
fn loads_llm_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[llm]
api_key = "gsk_toml"
base_url = "http://localhost:8080/v1"
model = "local-model"
temperature = 0.2
max_tokens = 4096
timeout_secs = 30
max_attempts = 2
backoff_base_secs = 3
"#,
        )?;

        let config: PmConfig = Figment::from(Serialized::defaults(PmConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.llm.api_key, "gsk_toml");
        assert_eq!(config.llm.base_url, "http://localhost:8080/v1");
        assert_eq!(config.llm.model, "local-model");
        assert!((config.llm.temperature - 0.2).abs() < f32::EPSILON);
        assert_eq!(config.llm.max_tokens, 4096);
        assert_eq!(config.llm.timeout_secs, 30);
        assert_eq!(config.llm.max_attempts, 2);
        assert_eq!(config.llm.backoff_base_secs, 3);
        Ok(())
    });
}

#[test]
fn project_config_file_is_discovered() {
    Jail::expect_with(|jail| {
        jail.create_dir(".postmortem")?;
        jail.create_file(
            ".postmortem/config.toml",
            r#"
[general]
prompts_dir = "./prompts"
validate_input = false
"#,
        )?;

        let config = PmConfig::load().expect("config loads");
        assert_eq!(config.general.prompts_dir(), Some("./prompts"));
        assert!(!config.general.validate_input);
        Ok(())
    });
}

#[test]
fn env_beats_project_toml() {
    Jail::expect_with(|jail| {
        jail.create_dir(".postmortem")?;
        jail.create_file(
            ".postmortem/config.toml",
            r#"
[llm]
model = "from-toml"
"#,
        )?;
        jail.set_env("POSTMORTEM_LLM__MODEL", "from-env");

        let config = PmConfig::load().expect("config loads");
        assert_eq!(config.llm.model, "from-env");
        Ok(())
    });
}

#[test]
fn partial_toml_keeps_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file("config.toml", "[llm]\nmodel = \"only-model\"\n")?;

        let config: PmConfig = Figment::from(Serialized::defaults(PmConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.llm.model, "only-model");
        assert_eq!(config.llm.max_attempts, 3);
        assert_eq!(config.llm.timeout_secs, 60);
        assert!(config.general.validate_input);
        Ok(())
    });
}
