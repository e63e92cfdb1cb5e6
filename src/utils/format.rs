/// Meteora app base URL for DLMM pool pages
const METEORA_APP_URL: &str = "https://app.meteora.ag/dlmm";

/// Format a pool address for display (shortened)
pub fn format_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    let len = chars.len();
    if len <= 8 {
        return address.to_string();
    }

    let head: String = chars[..4].iter().collect();
    let tail: String = chars[len - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

/// Format a USD amount compactly, e.g. `$1.25M`
pub fn format_usd(value: f64) -> String {
    let abs = value.abs();
    let sign = if value < 0.0 { "-" } else { "" };

    if abs >= 1_000_000_000.0 {
        format!("{}${:.2}B", sign, abs / 1_000_000_000.0)
    } else if abs >= 1_000_000.0 {
        format!("{}${:.2}M", sign, abs / 1_000_000.0)
    } else if abs >= 1_000.0 {
        format!("{}${:.1}K", sign, abs / 1_000.0)
    } else {
        format!("{}${:.2}", sign, abs)
    }
}

/// Format a ratio as a percentage, e.g. `0.385` -> `38.50%`
pub fn format_percent(ratio: f64) -> String {
    format!("{:.2}%", ratio * 100.0)
}

/// Link to the pool's page in the Meteora app
pub fn pool_url(address: &str) -> String {
    format!("{}/{}", METEORA_APP_URL, address)
}
