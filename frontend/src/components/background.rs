use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo_render::{request_animation_frame, AnimationFrame};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use wasm_bindgen::prelude::Closure;
use wasm_bindgen::JsCast;
use web_sys::{js_sys, window, HtmlVideoElement};
use yew::prelude::*;

use crate::config;
use crate::utils::media::{prefers_reduced_motion, start_playback};

/// A single twinkling point in the starfield.
#[derive(Clone, PartialEq, Debug)]
pub struct Star {
    pub left_pct: f64,
    pub top_pct: f64,
    pub size_px: f64,
    pub opacity: f64,
    pub twinkle_secs: f64,
    pub delay_secs: f64,
}

impl Star {
    pub fn style(&self) -> String {
        format!(
            "position: absolute; left: {:.2}%; top: {:.2}%; width: {size:.2}px; height: {size:.2}px; \
             border-radius: 999px; background: rgba(255,255,255,0.7); opacity: {:.2}; filter: blur(0.2px); \
             animation: twinkle {:.2}s ease-in-out {:.2}s infinite;",
            self.left_pct,
            self.top_pct,
            self.opacity,
            self.twinkle_secs,
            self.delay_secs,
            size = self.size_px,
        )
    }
}

/// Deterministic for a given seed, so a mount renders the same sky on every frame.
pub fn starfield(seed: u64, count: usize) -> Vec<Star> {
    let mut rng = SmallRng::seed_from_u64(seed);
    (0..count)
        .map(|_| Star {
            size_px: rng.gen_range(1.0..3.0),
            left_pct: rng.gen_range(0.0..100.0),
            top_pct: rng.gen_range(0.0..100.0),
            opacity: rng.gen_range(0.2..1.0),
            twinkle_secs: rng.gen_range(3.0..8.0),
            delay_secs: rng.gen_range(0.0..5.0),
        })
        .collect()
}

/// Layer offsets and dimming for one scroll position.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct ParallaxFrame {
    pub slow_offset: f64,
    pub fast_offset: f64,
    pub dim_opacity: f64,
}

impl ParallaxFrame {
    pub fn at(scroll_y: f64) -> Self {
        let scroll_y = scroll_y.max(0.0);
        Self {
            slow_offset: scroll_y * config::PARALLAX_SLOW,
            fast_offset: scroll_y * config::PARALLAX_FAST,
            dim_opacity: (scroll_y / config::DIM_RAMP_PX).min(1.0) * config::DIM_MAX_OPACITY,
        }
    }
}

fn current_scroll() -> f64 {
    window().and_then(|w| w.scroll_y().ok()).unwrap_or(0.0)
}

fn random_seed() -> u64 {
    (js_sys::Math::random() * u64::MAX as f64) as u64
}

/// Coalesces scroll events to at most one update per animation frame.
#[derive(Default)]
struct FrameThrottle {
    scheduled: Cell<bool>,
    handle: RefCell<Option<AnimationFrame>>,
}

#[derive(Properties, PartialEq)]
pub struct LiveBackgroundProps {
    #[prop_or_default]
    pub video_src: Option<AttrValue>,
}

#[function_component]
pub fn LiveBackground(props: &LiveBackgroundProps) -> Html {
    let stars = use_state(|| starfield(random_seed(), config::STAR_COUNT));
    let frame = use_state(|| ParallaxFrame::at(current_scroll()));
    let reduced_motion = use_state(prefers_reduced_motion);
    let video_ref = use_node_ref();

    {
        let video_ref = video_ref.clone();
        use_effect_with_deps(
            move |reduced: &bool| {
                if let Some(video) = video_ref.cast::<HtmlVideoElement>() {
                    if *reduced {
                        let _ = video.pause();
                    } else {
                        start_playback(&video, "ambient");
                    }
                }
                || ()
            },
            *reduced_motion,
        );
    }

    {
        let frame = frame.clone();
        use_effect_with_deps(
            move |_| {
                let throttle = Rc::new(FrameThrottle::default());
                let callback = Closure::<dyn Fn()>::new({
                    let throttle = throttle.clone();
                    move || {
                        if throttle.scheduled.replace(true) {
                            return;
                        }
                        let frame = frame.clone();
                        let inner = throttle.clone();
                        let handle = request_animation_frame(move |_| {
                            inner.scheduled.set(false);
                            frame.set(ParallaxFrame::at(current_scroll()));
                        });
                        *throttle.handle.borrow_mut() = Some(handle);
                    }
                });

                let destructor: Box<dyn FnOnce()> = match window() {
                    Some(win) => {
                        if let Err(e) = win.add_event_listener_with_callback("scroll", callback.as_ref().unchecked_ref()) {
                            log::warn!("Could not attach scroll listener: {:?}", e);
                        }
                        Box::new(move || {
                            let _ = win.remove_event_listener_with_callback("scroll", callback.as_ref().unchecked_ref());
                            throttle.handle.borrow_mut().take();
                        })
                    }
                    None => Box::new(|| ()),
                };
                move || destructor()
            },
            (),
        );
    }

    let slow = format!("transform: translate3d(0, {:.1}px, 0);", -frame.slow_offset);
    let fast = format!("transform: translate3d(0, {:.1}px, 0);", -frame.fast_offset);
    let dim = format!("opacity: {:.3};", frame.dim_opacity);
    let grid = "background-image: linear-gradient(rgba(255,255,255,.1) 1px, transparent 1px), \
                linear-gradient(90deg, rgba(255,255,255,.08) 1px, transparent 1px); \
                background-size: 60px 60px, 60px 60px; \
                mask-image: radial-gradient(70% 60% at 50% 50%, black, transparent);";

    html! {
        <div class="pointer-events-none fixed inset-0 -z-10 overflow-hidden" aria-hidden="true">
            <div class="absolute inset-0 bg-[radial-gradient(1200px_800px_at_70%_-10%,rgba(59,130,246,0.18),transparent_60%),radial-gradient(1000px_600px_at_20%_110%,rgba(168,85,247,0.14),transparent_60%),linear-gradient(180deg,#020617,60%,#050816)]"></div>

            if let Some(src) = props.video_src.clone() {
                <video
                    ref={video_ref}
                    class={classes!("absolute", "inset-0", "w-full", "h-full", "object-cover", "opacity-30", (*reduced_motion).then_some("hidden"))}
                    src={src}
                    autoplay={!*reduced_motion}
                    muted=true
                    loop=true
                    playsinline=true
                    preload="auto"
                />
            }

            <div class="absolute inset-0 opacity-[0.08]" style={grid}></div>

            <div class="absolute -inset-20 blur-3xl will-change-transform" style={slow}>
                <div class="absolute w-[70vw] h-[70vw] -left-1/3 -top-1/3 rounded-full bg-gradient-to-tr from-blue-600/25 via-cyan-400/20 to-transparent animate-slow-float"></div>
                <div class="absolute w-[60vw] h-[60vw] -right-1/4 -bottom-1/3 rounded-full bg-gradient-to-tr from-fuchsia-500/20 via-violet-400/20 to-transparent animate-slow-float-reverse"></div>
                <div class="absolute w-[40vw] h-[40vw] left-1/2 top-1/2 -translate-x-1/2 -translate-y-1/2 rounded-full bg-gradient-to-tr from-emerald-400/20 via-teal-300/20 to-transparent animate-slower-pulse"></div>
            </div>

            <div class="absolute inset-0 will-change-transform" style={fast}>
                { for stars.iter().enumerate().map(|(i, star)| html! {
                    <span key={i} style={star.style()}></span>
                }) }
            </div>

            <div class="absolute inset-0 bg-[radial-gradient(circle_at_50%_-20%,rgba(255,255,255,0.06),transparent_55%)]"></div>
            <div class="absolute inset-0 bg-black" style={dim}></div>
        </div>
    }
}
