//! `dsmesh external` - Show this host's public addresses.

use anyhow::Result;
use colored::Colorize;
use dsmesh::{
    EchoClient, ExternalAddressResolver, Origin, Resolution, ResolverConfig, UdpRouteProbe,
};
use std::sync::Arc;

use super::Context;
use crate::output::OutputFormat;

pub async fn execute(ctx: Context) -> Result<()> {
    let config = ResolverConfig::default();
    let echo = EchoClient::from_config(&config)?;
    let probe = Arc::new(UdpRouteProbe);

    let v4 = ExternalAddressResolver::v4(&config, echo.clone(), probe.clone())
        .resolve()
        .await;
    let v6 = ExternalAddressResolver::v6(&config, echo, probe)
        .resolve()
        .await;

    match ctx.output_format {
        OutputFormat::Json => {
            println!("{}", summary(&v4, &v6));
        }
        OutputFormat::Pretty => {
            print_line(&v4);
            print_line(&v6);
        }
    }

    Ok(())
}

/// JSON summary: one key per family, the failure cause when degraded
fn summary(v4: &Resolution, v6: &Resolution) -> serde_json::Value {
    serde_json::json!({
        "ipv4": v4.v4(),
        "ipv6": v6.v6(),
        "ipv4_error": v4.cause.as_ref().map(ToString::to_string),
        "ipv6_error": v6.cause.as_ref().map(ToString::to_string),
    })
}

const fn via(origin: Origin) -> &'static str {
    match origin {
        Origin::Probe => "route",
        Origin::Echo | Origin::None => "echo",
    }
}

fn print_line(resolution: &Resolution) {
    let label = format!("{}:", resolution.family);
    match (resolution.address, &resolution.cause) {
        (Some(ip), _) => println!(
            "{} {} {}",
            label.bold(),
            ip.to_string().cyan().bold(),
            format!("({})", via(resolution.origin)).dimmed()
        ),
        (None, Some(cause)) => println!(
            "{} {} {}",
            label.bold(),
            "unknown".yellow(),
            format!("({cause})").dimmed()
        ),
        (None, None) => println!("{} {}", label.bold(), "unknown".yellow()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dsmesh::{AddressFamily, FallbackCause};

    #[test]
    fn summary_reports_degraded_family() {
        let v4 = Resolution {
            family: AddressFamily::V4,
            address: Some("203.0.113.7".parse().unwrap()),
            origin: Origin::Probe,
            cause: None,
        };
        let v6 = Resolution {
            family: AddressFamily::V6,
            address: None,
            origin: Origin::None,
            cause: Some(FallbackCause::Status(503)),
        };

        let json = summary(&v4, &v6);
        assert_eq!(json["ipv4"], "203.0.113.7");
        assert!(json["ipv6"].is_null());
        assert!(json["ipv4_error"].is_null());
        assert_eq!(json["ipv6_error"], FallbackCause::Status(503).to_string());
    }

    #[test]
    fn via_names_the_source() {
        assert_eq!(via(Origin::Probe), "route");
        assert_eq!(via(Origin::Echo), "echo");
    }
}
