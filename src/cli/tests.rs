#[cfg(test)]
mod tests {
    use crate::cli::Args;
    use crate::config::LLMProvider;
    use clap::Parser;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    #[test]
    fn test_args_requires_brand() {
        assert!(Args::try_parse_from(["brand-scout"]).is_err());
    }

    #[test]
    fn test_args_default_values() {
        let args = Args::try_parse_from(["brand-scout", "--brand", "Acme"]).unwrap();

        assert_eq!(args.brand, "Acme");
        assert_eq!(args.goal, "explore a brand partnership");
        assert_eq!(args.cta, "schedule a short introductory call");
        assert!(args.config.is_none());
        assert!(args.max_candidates.is_none());
        assert!(args.output_path.is_none());
        assert!(!args.no_save);
        assert!(!args.verbose);
    }

    #[test]
    fn test_args_short_options() {
        let args = Args::try_parse_from([
            "brand-scout",
            "-b",
            "Acme",
            "-n",
            "3",
            "-o",
            "/tmp/reports",
            "-m",
            "gpt-4o",
            "-v",
        ])
        .unwrap();

        assert_eq!(args.brand, "Acme");
        assert_eq!(args.max_candidates, Some(3));
        assert_eq!(args.output_path, Some(PathBuf::from("/tmp/reports")));
        assert_eq!(args.model, Some("gpt-4o".to_string()));
        assert!(args.verbose);
    }

    #[test]
    fn test_into_config_applies_overrides() {
        let args = Args::try_parse_from([
            "brand-scout",
            "--brand",
            "Acme",
            "--llm-provider",
            "deepseek",
            "--llm-api-key",
            "llm-key",
            "--llm-api-base-url",
            "https://api.deepseek.com",
            "--contacts-api-key",
            "hunter-key",
            "--max-candidates",
            "7",
            "--max-parallels",
            "2",
            "--output-path",
            "/tmp/out",
            "--no-save",
        ])
        .unwrap();

        let config = args.into_config().unwrap();
        assert_eq!(config.llm.provider, LLMProvider::DeepSeek);
        assert_eq!(config.llm.api_key, "llm-key");
        assert_eq!(config.llm.api_base_url, "https://api.deepseek.com");
        assert_eq!(config.contacts.api_key, "hunter-key");
        assert_eq!(config.research.max_candidates, 7);
        assert_eq!(config.llm.max_parallels, 2);
        assert_eq!(config.research.output_path, PathBuf::from("/tmp/out"));
        assert!(!config.research.save_report);
    }

    #[test]
    fn test_into_config_ignores_unknown_provider() {
        let args =
            Args::try_parse_from(["brand-scout", "--brand", "Acme", "--llm-provider", "nope"]).unwrap();

        let config = args.into_config().unwrap();
        assert_eq!(config.llm.provider, LLMProvider::OpenAI);
    }

    #[test]
    fn test_into_config_reads_explicit_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[llm]
provider = "anthropic"
model = "claude-test"

[research]
max_candidates = 2
"#
        )
        .unwrap();

        let path = file.path().to_string_lossy().to_string();
        let args = Args::try_parse_from(["brand-scout", "--brand", "Acme", "--config", &path]).unwrap();

        let config = args.into_config().unwrap();
        assert_eq!(config.llm.provider, LLMProvider::Anthropic);
        assert_eq!(config.llm.model, "claude-test");
        assert_eq!(config.research.max_candidates, 2);
    }

    #[test]
    fn test_into_config_missing_explicit_file_is_error() {
        let args = Args::try_parse_from([
            "brand-scout",
            "--brand",
            "Acme",
            "--config",
            "/nonexistent/brand-scout.toml",
        ])
        .unwrap();

        assert!(args.into_config().is_err());
    }

    #[test]
    fn test_to_request() {
        let args = Args::try_parse_from([
            "brand-scout",
            "--brand",
            "Acme",
            "--sender-name",
            "Sam Rivera",
            "--sender-role",
            "Partnerships Lead",
            "--sender-expertise",
            "co-marketing",
            "--goal",
            "co-branded campaign",
            "--cta",
            "reply to this email",
        ])
        .unwrap();

        let request = args.to_request();
        assert_eq!(request.seed_brand, "Acme");
        assert_eq!(request.sender.name, "Sam Rivera");
        assert_eq!(request.sender.brand, "Acme");
        assert_eq!(request.sender.role, "Partnerships Lead");
        assert_eq!(request.outreach_goal, "co-branded campaign");
        assert_eq!(request.call_to_action, "reply to this email");
    }

    #[test]
    fn test_to_request_with_explicit_sender_brand() {
        let args = Args::try_parse_from([
            "brand-scout",
            "--brand",
            "Acme",
            "--sender-brand",
            "Umbrella",
        ])
        .unwrap();

        assert_eq!(args.to_request().sender.brand, "Umbrella");
    }
}
