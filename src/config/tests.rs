#[cfg(test)]
mod tests {
    use crate::config::{DEFAULT_EDGE_CACHE_TTL_SECS, GatewayConfig};
    use std::collections::HashMap;
    use std::time::Duration;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    fn minimal() -> Vec<(&'static str, &'static str)> {
        vec![
            ("FIGMA_TOKEN", "figd_token"),
            ("ADMIN_USER", "admin"),
            ("ADMIN_PASS", "secret"),
        ]
    }

    #[test]
    fn test_defaults_apply() {
        let config = GatewayConfig::from_lookup(lookup_from(&minimal())).unwrap();

        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8787");
        assert_eq!(config.figma_api_base, "https://api.figma.com");
        assert_eq!(config.figma_token, "figd_token");
        assert_eq!(config.admin.username, "admin");
        assert!(config.storage_dir.is_none());
        assert_eq!(
            config.edge_cache_ttl,
            Duration::from_secs(DEFAULT_EDGE_CACHE_TTL_SECS)
        );
    }

    #[test]
    fn test_missing_token_is_error() {
        let vars = [("ADMIN_USER", "admin"), ("ADMIN_PASS", "secret")];
        let err = GatewayConfig::from_lookup(lookup_from(&vars)).unwrap_err();
        assert!(err.to_string().contains("FIGMA_TOKEN"));
    }

    #[test]
    fn test_empty_password_is_error() {
        let vars = [
            ("FIGMA_TOKEN", "t"),
            ("ADMIN_USER", "admin"),
            ("ADMIN_PASS", ""),
        ];
        assert!(GatewayConfig::from_lookup(lookup_from(&vars)).is_err());
    }

    #[test]
    fn test_overrides_are_read() {
        let mut vars = minimal();
        vars.push(("GATEWAY_BIND", "0.0.0.0:9000"));
        vars.push(("STORAGE_DIR", "/var/lib/gateway"));
        vars.push(("EDGE_CACHE_TTL_SECS", "60"));
        vars.push(("FIGMA_API_BASE", "http://127.0.0.1:1234"));

        let config = GatewayConfig::from_lookup(lookup_from(&vars)).unwrap();

        assert_eq!(config.bind_addr.port(), 9000);
        assert_eq!(
            config.storage_dir.as_deref(),
            Some(std::path::Path::new("/var/lib/gateway"))
        );
        assert_eq!(config.edge_cache_ttl, Duration::from_secs(60));
        assert_eq!(config.figma_api_base, "http://127.0.0.1:1234");
    }

    #[test]
    fn test_bad_bind_is_error() {
        let mut vars = minimal();
        vars.push(("GATEWAY_BIND", "not-an-address"));
        assert!(GatewayConfig::from_lookup(lookup_from(&vars)).is_err());
    }

    #[test]
    fn test_bind_argument_overrides_env() {
        let config = GatewayConfig::from_lookup(lookup_from(&minimal()))
            .unwrap()
            .with_args(&[
                "figma-image-gateway".to_string(),
                "--bind".to_string(),
                "127.0.0.1:5000".to_string(),
            ])
            .unwrap();

        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:5000");
    }

    #[test]
    fn test_bind_argument_without_value_is_error() {
        let config = GatewayConfig::from_lookup(lookup_from(&minimal())).unwrap();
        assert!(
            config
                .with_args(&["figma-image-gateway".to_string(), "--bind".to_string()])
                .is_err()
        );
    }

    #[test]
    fn test_debug_redacts_password() {
        let config = GatewayConfig::from_lookup(lookup_from(&minimal())).unwrap();
        let printed = format!("{:?}", config);
        assert!(!printed.contains("secret"));
    }
}
