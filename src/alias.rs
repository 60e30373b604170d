//! MAC address aliasing for EYE sensors.
//!
//! Maps MAC addresses to human-readable names so individual sensors are
//! easy to identify in the JSON output.

use crate::mac_address::MacAddress;
use std::collections::HashMap;

/// A type alias for MAC-to-name mappings.
pub type AliasMap = HashMap<MacAddress, String>;

/// A parsed alias mapping a MAC address to a human-readable name.
#[derive(Debug, Clone)]
pub struct Alias {
    /// The sensor's MAC address.
    pub address: MacAddress,
    /// The human-readable name (e.g., "Front Door").
    pub name: String,
}

/// Parse an alias from a string in the format "MAC=NAME".
///
/// # Example
/// ```
/// use eye_listener::alias::parse_alias;
///
/// let alias = parse_alias("AA:BB:CC:DD:EE:FF=Kitchen").unwrap();
/// assert_eq!(alias.address.to_string(), "AA:BB:CC:DD:EE:FF");
/// assert_eq!(alias.name, "Kitchen");
/// ```
pub fn parse_alias(src: &str) -> Result<Alias, String> {
    let (address, name) = src
        .split_once('=')
        .ok_or_else(|| "invalid alias: expected format MAC=NAME".to_string())?;
    let address: MacAddress = address.parse().map_err(|e| format!("{e}"))?;
    Ok(Alias {
        address,
        name: name.into(),
    })
}

/// Convert a slice of Alias values into an AliasMap.
pub fn to_map(aliases: &[Alias]) -> AliasMap {
    aliases
        .iter()
        .map(|a| (a.address, a.name.clone()))
        .collect()
}

/// Resolve the display name for a device: its alias if one was configured,
/// otherwise the MAC address string.
pub fn resolve_name(mac: &MacAddress, aliases: &AliasMap) -> String {
    aliases
        .get(mac)
        .cloned()
        .unwrap_or_else(|| mac.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_alias_valid() {
        let alias = parse_alias("AA:BB:CC:DD:EE:FF=Kitchen").unwrap();
        assert_eq!(
            alias.address,
            MacAddress([0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF])
        );
        assert_eq!(alias.name, "Kitchen");
    }

    #[test]
    fn test_parse_alias_with_spaces() {
        let alias = parse_alias("AA:BB:CC:DD:EE:FF=Living Room").unwrap();
        assert_eq!(alias.name, "Living Room");
    }

    #[test]
    fn test_parse_alias_no_equals_sign() {
        assert!(parse_alias("no-equals-sign").is_err());
    }

    #[test]
    fn test_parse_alias_bad_mac() {
        assert!(parse_alias("not-a-mac=Kitchen").is_err());
    }

    #[test]
    fn test_to_map() {
        let aliases = vec![
            Alias {
                address: MacAddress([0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF]),
                name: "Kitchen".to_string(),
            },
            Alias {
                address: MacAddress([0x11, 0x22, 0x33, 0x44, 0x55, 0x66]),
                name: "Bedroom".to_string(),
            },
        ];
        let map = to_map(&aliases);
        assert_eq!(
            map.get(&MacAddress([0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF])),
            Some(&"Kitchen".to_string())
        );
        assert_eq!(
            map.get(&MacAddress([0x11, 0x22, 0x33, 0x44, 0x55, 0x66])),
            Some(&"Bedroom".to_string())
        );
        assert_eq!(map.get(&MacAddress::default()), None);
    }

    #[test]
    fn test_resolve_name_falls_back_to_mac() {
        let mac = MacAddress([0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF]);

        let mut aliases = AliasMap::new();
        assert_eq!(resolve_name(&mac, &aliases), "AA:BB:CC:DD:EE:FF");

        aliases.insert(mac, "Sauna".to_string());
        assert_eq!(resolve_name(&mac, &aliases), "Sauna");
    }
}
