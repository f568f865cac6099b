//! Small UI helpers: human-readable sizes, durations, truncation.

/// 1536 -> "2 KB" (rounded to the nearest whole unit, like the admin panel).
pub fn bytes_to_size(bytes: u64) -> String {
    const SIZES: [&str; 5] = ["Bytes", "KB", "MB", "GB", "TB"];
    if bytes == 0 {
        return "0 Byte".into();
    }
    let i = ((bytes as f64).ln() / 1024f64.ln()).floor() as usize;
    let i = i.min(SIZES.len() - 1);
    let scaled = (bytes as f64 / 1024f64.powi(i as i32)).round();
    format!("{} {}", scaled, SIZES[i])
}

/// 93784 -> "1d,2h,3m,4s"; zero leading units are dropped, seconds always shown.
pub fn secs_dhms(seconds: i64) -> String {
    let seconds = seconds.max(0);
    let d = seconds / (3600 * 24);
    let h = seconds % (3600 * 24) / 3600;
    let m = seconds % 3600 / 60;
    let s = seconds % 60;

    let mut out = String::new();
    if d > 0 {
        out.push_str(&format!("{d}d,"));
    }
    if h > 0 {
        out.push_str(&format!("{h}h,"));
    }
    if m > 0 {
        out.push_str(&format!("{m}m,"));
    }
    out.push_str(&format!("{s}s"));
    out
}

pub fn truncate_middle(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    if max <= 3 {
        return "...".into();
    }
    let keep = max - 3;
    let left = keep / 2;
    let right = keep - left;
    format!("{}...{}", &s[..left], &s[s.len() - right..])
}
