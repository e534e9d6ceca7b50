//! URI authority component (`[userinfo@]host[:port]`).

use super::error::InvalidUri;
use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

/// Authority of an absolute URI.
///
/// The userinfo is kept exactly as written (still percent-encoded); decoding
/// it into credentials is the job of [`super::extract_credentials`].
#[derive(Clone, PartialEq, Eq)]
pub struct Authority {
    userinfo: Option<String>,
    host: Host,
    port: Option<u16>,
}

/// Host of an authority: IPv4, bracketed IPv6, or a registered name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Host {
    Ipv4(Ipv4Addr),
    Ipv6(Ipv6Addr),
    RegName(String),
}

impl Authority {
    /// Parses the authority at the start of `s` (the text right after `//`)
    /// and returns it with the unparsed remainder. An empty authority yields
    /// `None`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidUri` if the userinfo, host or port is malformed.
    pub(crate) fn parse_with_remainder(s: &str) -> Result<(Option<Self>, &str), InvalidUri> {
        let end = s.find(['/', '?', '#']).unwrap_or(s.len());
        let (authority_str, remainder) = s.split_at(end);

        if authority_str.is_empty() {
            return Ok((None, remainder));
        }

        Ok((Some(Self::parse(authority_str)?), remainder))
    }

    /// Parses a bare authority such as `user:pass@example.com:8080`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidUri` if the userinfo, host or port is malformed.
    pub fn parse(s: &str) -> Result<Self, InvalidUri> {
        // the last '@' separates userinfo; an unescaped '@' in a password
        // is tolerated this way
        let (userinfo, host_port) = match s.rfind('@') {
            Some(at_pos) => {
                let userinfo = &s[..at_pos];
                Self::validate_userinfo(userinfo)?;
                let userinfo = (!userinfo.is_empty()).then(|| userinfo.to_string());
                (userinfo, &s[at_pos + 1..])
            }
            None => (None, s),
        };

        let (host, port) = Self::parse_host_port(host_port)?;

        Ok(Authority {
            userinfo,
            host,
            port,
        })
    }

    fn parse_host_port(s: &str) -> Result<(Host, Option<u16>), InvalidUri> {
        if let Some(bracketed) = s.strip_prefix('[') {
            let close = bracketed
                .find(']')
                .ok_or_else(|| InvalidUri::new("unclosed IPv6 bracket"))?;

            let ipv6_str = &bracketed[..close];
            let ipv6: Ipv6Addr = ipv6_str
                .parse()
                .map_err(|_| InvalidUri::new(format!("invalid IPv6 address: {ipv6_str}")))?;

            let after = &bracketed[close + 1..];
            let port = match after.strip_prefix(':') {
                Some(port) => Some(Self::parse_port(port)?),
                None if after.is_empty() => None,
                None => return Err(InvalidUri::new("invalid characters after IPv6 bracket")),
            };

            return Ok((Host::Ipv6(ipv6), port));
        }

        let (host_part, port) = match s.rsplit_once(':') {
            Some((host, port)) => (host, Some(Self::parse_port(port)?)),
            None => (s, None),
        };

        if host_part.is_empty() {
            return Err(InvalidUri::new("empty host"));
        }

        if let Ok(ipv4) = host_part.parse::<Ipv4Addr>() {
            return Ok((Host::Ipv4(ipv4), port));
        }

        Self::validate_reg_name(host_part)?;
        Ok((Host::RegName(host_part.to_string()), port))
    }

    fn parse_port(s: &str) -> Result<u16, InvalidUri> {
        s.parse::<u16>()
            .map_err(|_| InvalidUri::new(format!("invalid port: {s}")))
    }

    // unreserved / pct-encoded / sub-delims
    fn validate_reg_name(s: &str) -> Result<(), InvalidUri> {
        match s
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || "-._~!$&'()*+,;=%".contains(*c)))
        {
            Some(bad) => Err(InvalidUri::new(format!("invalid host character: {bad:?}"))),
            None => Ok(()),
        }
    }

    // unreserved / pct-encoded / sub-delims / ":" (plus '@' for the rfind split)
    fn validate_userinfo(s: &str) -> Result<(), InvalidUri> {
        match s
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || "-._~!$&'()*+,;=%:@".contains(*c)))
        {
            Some(bad) => Err(InvalidUri::new(format!(
                "invalid userinfo character: {bad:?}"
            ))),
            None => Ok(()),
        }
    }

    #[must_use]
    pub fn host(&self) -> &Host {
        &self.host
    }

    #[must_use]
    pub fn port(&self) -> Option<u16> {
        self.port
    }

    /// Raw, still percent-encoded userinfo.
    #[must_use]
    pub fn userinfo(&self) -> Option<&str> {
        self.userinfo.as_deref()
    }
}

impl Host {
    /// Host text as used in a `Host` header: IPv6 addresses keep brackets.
    #[must_use]
    pub fn to_header_value(&self) -> String {
        match self {
            Host::Ipv4(addr) => addr.to_string(),
            Host::Ipv6(addr) => format!("[{addr}]"),
            Host::RegName(name) => name.clone(),
        }
    }
}

// userinfo is deliberately absent so a stray `{:?}` cannot leak a password
impl fmt::Debug for Authority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Authority")
            .field("userinfo", &self.userinfo.as_ref().map(|_| "<REDACTED>"))
            .field("host", &self.host)
            .field("port", &self.port)
            .finish()
    }
}

impl fmt::Display for Authority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(userinfo) = &self.userinfo {
            write!(f, "{userinfo}@")?;
        }
        write!(f, "{}", self.host)?;
        if let Some(port) = self.port {
            write!(f, ":{port}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_header_value())
    }
}
