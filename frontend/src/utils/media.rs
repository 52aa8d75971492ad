use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{window, HtmlMediaElement};

const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

/// True when the user asked the OS to minimise animation.
pub fn prefers_reduced_motion() -> bool {
    window()
        .and_then(|w| w.match_media(REDUCED_MOTION_QUERY).ok().flatten())
        .map(|query| query.matches())
        .unwrap_or(false)
}

/// Starts muted playback. Rejections are expected when autoplay is blocked,
/// so they are only logged.
pub fn start_playback(media: &HtmlMediaElement, label: &'static str) {
    media.set_muted(true);
    match media.play() {
        Ok(promise) => spawn_local(async move {
            if let Err(e) = JsFuture::from(promise).await {
                log::debug!("{} playback did not start: {:?}", label, e);
            }
        }),
        Err(e) => log::debug!("{} playback did not start: {:?}", label, e),
    }
}
