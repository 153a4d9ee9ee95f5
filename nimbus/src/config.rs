//! Client configuration for the command line
//!
//! The shared `nimbus` config file and `NIMBUS_*` environment come first;
//! flags given on the command line win over both.

use nimbus_core::ClientConfig;

use crate::GlobalArgs;

pub fn client_config(args: &GlobalArgs) -> anyhow::Result<ClientConfig> {
    Ok(apply_overrides(ClientConfig::load()?, args))
}

fn apply_overrides(mut config: ClientConfig, args: &GlobalArgs) -> ClientConfig {
    if let Some(region) = &args.region {
        config = config.with_region(region);
    }
    if let Some(endpoint) = &args.endpoint {
        config = config.with_endpoint(endpoint);
    }
    if args.no_prefetch {
        config = config.with_prefetch(false);
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_loaded_config() {
        let args = GlobalArgs {
            region: Some("ap-southeast-2".to_string()),
            endpoint: Some("http://localhost:4566".to_string()),
            no_prefetch: true,
            ..GlobalArgs::default()
        };

        let config = apply_overrides(ClientConfig::default(), &args);
        assert_eq!(config.region, "ap-southeast-2");
        assert_eq!(config.endpoint.as_deref(), Some("http://localhost:4566"));
        assert!(!config.prefetch);
    }

    #[test]
    fn test_no_flags_keep_loaded_values() {
        let loaded = ClientConfig::default().with_region("eu-central-1");
        let config = apply_overrides(loaded, &GlobalArgs::default());
        assert_eq!(config.region, "eu-central-1");
        assert_eq!(config.endpoint, None);
        assert!(config.prefetch);
    }
}
