/// Backend used when `BACKEND_URL` is not set at build time.
const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

/// Safety timeout per intro clip in case `ended` never fires (mobile autoplay).
pub const INTRO_CLIP_FALLBACK_MS: u32 = 7_000;
/// Matches the overlay's CSS fade duration.
pub const INTRO_FADE_OUT_MS: u32 = 450;

pub const STAR_COUNT: usize = 140;

pub const PARALLAX_SLOW: f64 = 0.15;
pub const PARALLAX_FAST: f64 = 0.35;
/// Scroll distance (px) over which the dimming overlay ramps up.
pub const DIM_RAMP_PX: f64 = 900.0;
pub const DIM_MAX_OPACITY: f64 = 0.6;

pub fn get_backend_url() -> String {
    normalize_backend_url(option_env!("BACKEND_URL"))
}

fn normalize_backend_url(raw: Option<&str>) -> String {
    match raw.map(str::trim) {
        Some(url) if !url.is_empty() => url.trim_end_matches('/').to_string(),
        _ => DEFAULT_BACKEND_URL.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_to_local_backend() {
        assert_eq!(normalize_backend_url(None), "http://localhost:8000");
        assert_eq!(normalize_backend_url(Some("  ")), "http://localhost:8000");
    }

    #[test]
    fn strips_trailing_slash() {
        assert_eq!(
            normalize_backend_url(Some("https://api.jetlegs.example/")),
            "https://api.jetlegs.example"
        );
    }
}
