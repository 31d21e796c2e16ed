//! Detect source media dimensions from project metadata or the item name.

use cutline_timeline_model::{FrameSize, SourceDescriptor};

/// Metadata key pairs tried after the `WIDTHxHEIGHT` pattern, in order.
const SIZE_KEYS: [(&str, &str); 2] = [
    ("framewidth", "frameheight"),
    ("mediawidth", "mediaheight"),
];

/// Source dimensions, trying in order:
/// 1. a `WIDTHxHEIGHT` pattern in the metadata (3 to 5 digits each side,
///    `x`, `X` or `×` between, optional spaces),
/// 2. `FrameWidth` / `FrameHeight` metadata keys,
/// 3. `MediaWidth` / `MediaHeight` metadata keys,
/// 4. a `WIDTHxHEIGHT` pattern in the item name.
pub fn probe_source_size(source: &SourceDescriptor) -> Option<FrameSize> {
    let from_metadata = || {
        let md = source.metadata.as_str();
        find_dimension_pair(md).or_else(|| {
            SIZE_KEYS.iter().find_map(|(w, h)| {
                let size = FrameSize::new(find_key_number(md, w)?, find_key_number(md, h)?);
                Some(size)
            })
        })
    };

    from_metadata()
        .or_else(|| find_dimension_pair(&source.name))
        .filter(FrameSize::is_valid)
}

/// First `(\d{3,5})\s*[x×]\s*(\d{3,5})` match, case-insensitive.
fn find_dimension_pair(text: &str) -> Option<FrameSize> {
    let chars: Vec<char> = text.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        if !chars[i].is_ascii_digit() {
            i += 1;
            continue;
        }
        let run_start = i;
        while i < chars.len() && chars[i].is_ascii_digit() {
            i += 1;
        }
        let run_len = i - run_start;
        if run_len < 3 {
            continue;
        }
        // A longer run still matches on its last five digits.
        let width_start = i - run_len.min(5);
        if let Some(height) = match_separator_and_height(&chars, i) {
            let width = digits_value(&chars[width_start..i])?;
            return Some(FrameSize::new(width, height));
        }
    }
    None
}

/// Match `\s*[xX×]\s*(\d{3,5})` at `pos`, returning the height.
fn match_separator_and_height(chars: &[char], mut pos: usize) -> Option<u32> {
    while pos < chars.len() && chars[pos].is_whitespace() {
        pos += 1;
    }
    if !matches!(chars.get(pos), Some('x' | 'X' | '×')) {
        return None;
    }
    pos += 1;
    while pos < chars.len() && chars[pos].is_whitespace() {
        pos += 1;
    }
    let start = pos;
    while pos < chars.len() && pos - start < 5 && chars[pos].is_ascii_digit() {
        pos += 1;
    }
    if pos - start < 3 {
        return None;
    }
    digits_value(&chars[start..pos])
}

fn digits_value(digits: &[char]) -> Option<u32> {
    digits.iter().collect::<String>().parse().ok()
}

/// Value of `key` written as `key: 1920`, `"key" = "1920"` and similar
/// (`key["']?\s*[:=]\s*["']?(\d+)`), case-insensitive.
fn find_key_number(text: &str, key: &str) -> Option<u32> {
    let lower = text.to_ascii_lowercase();
    let mut search_from = 0;
    while let Some(found) = lower[search_from..].find(key) {
        let after = search_from + found + key.len();
        if let Some(value) = parse_key_value(&lower[after..]) {
            return Some(value);
        }
        search_from = after;
    }
    None
}

fn parse_key_value(rest: &str) -> Option<u32> {
    let mut rest = rest.strip_prefix(['"', '\'']).unwrap_or(rest);
    rest = rest.trim_start();
    rest = rest.strip_prefix([':', '='])?;
    rest = rest.trim_start();
    rest = rest.strip_prefix(['"', '\'']).unwrap_or(rest);
    let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
    digits.parse().ok()
}
