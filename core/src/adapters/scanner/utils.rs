pub struct Utils;

impl Utils {
    /// Parse an address:port string.
    ///
    /// Handles multiple address formats:
    /// - IPv4: "127.0.0.1:3000" or "*:8080"
    /// - IPv6: "\[::1]:3000", "\[fe80::1%eth0]:8080" (lsof) or "\[fe80::1]%eth0:8080" (ss)
    /// - Interface-scoped: "127.0.0.53%lo:53"
    ///
    /// The interface suffix is dropped from the returned address.
    pub fn parse_address(address: &str) -> Option<(String, u16)> {
        if address.starts_with('[') {
            // IPv6 format: [::1]:3000
            let bracket_end = address.find(']')?;
            let host = strip_scope(&address[1..bracket_end]);
            // ss puts the scope after the bracket: [fe80::1]%eth0:546
            let rest = &address[bracket_end + 1..];
            let port = match rest.strip_prefix(':') {
                Some(port) => port,
                None if rest.starts_with('%') => &rest[rest.rfind(':')? + 1..],
                None => return None,
            };
            let port: u16 = port.parse().ok()?;
            Some((format!("[{}]", host), port))
        } else {
            // IPv4 format: 127.0.0.1:3000 or *:8080
            let last_colon = address.rfind(':')?;
            let addr = strip_scope(&address[..last_colon]);
            let port: u16 = address[last_colon + 1..].parse().ok()?;
            let addr = if addr.is_empty() { "*" } else { addr };
            Some((addr.to_string(), port))
        }
    }
}

fn strip_scope(host: &str) -> &str {
    match host.find('%') {
        Some(idx) => &host[..idx],
        None => host,
    }
}
