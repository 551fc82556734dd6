//! Uplink decoding utility
//! Decodes a hex TULIP3 payload against a device profile and prints the JSON result

use std::env;
use tracing_subscriber::{fmt::format::FmtSpan, prelude::*, EnvFilter};
use tulip3_codec::{decode_uplink, DeviceProfile};

fn parse_hex(text: &str) -> anyhow::Result<Vec<u8>> {
    let digits: Vec<u8> = text
        .trim()
        .trim_start_matches("0x")
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ':')
        .map(|c| {
            c.to_digit(16)
                .map(|d| d as u8)
                .ok_or_else(|| anyhow::anyhow!("Invalid hex digit '{}' in payload", c))
        })
        .collect::<anyhow::Result<_>>()?;

    if digits.len() % 2 != 0 {
        anyhow::bail!("Hex payload has an odd number of digits ({})", digits.len());
    }

    Ok(digits.chunks(2).map(|pair| (pair[0] << 4) | pair[1]).collect())
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let filter_layer = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))?;

    let format_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr)
        .with_span_events(FmtSpan::NONE);

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(format_layer)
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 || args.len() > 3 {
        eprintln!("Usage: {} <hex-payload> [profile.json]", args[0]);
        eprintln!("Example: {} 1501010400020001 profile.json", args[0]);
        eprintln!("\nWithout a profile, only communication module registers can be validated.");
        std::process::exit(1);
    }

    let payload = parse_hex(&args[1])?;
    tracing::info!("Payload: {} bytes", payload.len());

    let profile = match args.get(2) {
        Some(path) => {
            tracing::info!("Loading device profile from {}", path);
            DeviceProfile::from_file(path)?
        }
        None => DeviceProfile::new(),
    };

    let decoded = decode_uplink(&payload, &profile)?;
    println!("{}", serde_json::to_string_pretty(&decoded)?);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        assert_eq!(
            parse_hex("0x1501 0104:0002 0001").unwrap(),
            vec![0x15, 0x01, 0x01, 0x04, 0x00, 0x02, 0x00, 0x01]
        );
        assert_eq!(parse_hex("aBcD").unwrap(), vec![0xAB, 0xCD]);
        assert!(parse_hex("150").is_err());
    }

    #[test]
    fn test_parse_hex_rejects_non_hex() {
        assert!(parse_hex("15zz").is_err());
        // multibyte characters must not split a byte slice
        assert!(parse_hex("1é").is_err());
        assert!(parse_hex("é1").is_err());
        assert!(parse_hex("١٥").is_err());
    }
}
