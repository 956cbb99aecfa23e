//! Sequential color ramps.

/// Anchors of the inferno color map, evenly spaced from 0.0 (black) to 1.0 (pale yellow).
const INFERNO: &[(u8, u8, u8)] = &[
    (0x00, 0x00, 0x04),
    (0x16, 0x0b, 0x39),
    (0x42, 0x0a, 0x68),
    (0x6a, 0x17, 0x6e),
    (0x93, 0x26, 0x67),
    (0xbc, 0x37, 0x54),
    (0xdd, 0x51, 0x3a),
    (0xf3, 0x77, 0x1a),
    (0xfc, 0xa5, 0x0a),
    (0xf6, 0xd7, 0x46),
    (0xfc, 0xff, 0xa4),
];

/// Returns `n` hex colors sampled evenly along the inferno ramp, darkest first.
///
/// ## Examples
///
/// ```rust
/// use flupred::aggregate::palette::inferno;
/// assert_eq!(inferno(0), Vec::<String>::new());
/// assert_eq!(inferno(1), ["#000004"]);
/// assert_eq!(inferno(2), ["#000004", "#fcffa4"]);
/// assert_eq!(inferno(11)[5], "#bc3754");
/// ```
pub fn inferno(n: usize) -> Vec<String> {
    match n {
        0 => Vec::new(),
        1 => vec![hex(INFERNO[0])],
        n => (0..n).map(|i| sample(INFERNO, i as f64 / (n - 1) as f64)).collect(),
    }
}

/// Relative luminance (0.0 dark to 1.0 light) of a `#rrggbb` color, if it parses.
///
/// ```rust
/// use flupred::aggregate::palette::luminance;
/// assert!(luminance("#000004").unwrap() < luminance("#fcffa4").unwrap());
/// assert_eq!(luminance("blue"), None);
/// ```
pub fn luminance(color: &str) -> Option<f64> {
    let color = color.strip_prefix('#')?;
    if color.len() != 6 || !color.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&color[i..i + 2], 16).ok().map(|c| c as f64 / 255.0);
    Some(0.2126 * channel(0)? + 0.7152 * channel(2)? + 0.0722 * channel(4)?)
}

fn sample(ramp: &[(u8, u8, u8)], t: f64) -> String {
    let t = t.clamp(0.0, 1.0);
    let scaled = t * (ramp.len() - 1) as f64;
    let i = (scaled.floor() as usize).min(ramp.len() - 2);
    let frac = scaled - i as f64;
    let (a, b) = (ramp[i], ramp[i + 1]);
    let mix = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * frac).round() as u8;
    hex((mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2)))
}

fn hex((r, g, b): (u8, u8, u8)) -> String {
    format!("#{r:02x}{g:02x}{b:02x}")
}
