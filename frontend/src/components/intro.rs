use std::rc::Rc;

use gloo_timers::callback::Timeout;
use web_sys::HtmlVideoElement;
use yew::prelude::*;

use crate::config;
use crate::utils::media::{prefers_reduced_motion, start_playback};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum IntroStage {
    Boarding,
    Cabin,
    Done,
}

/// Clip events carry the stage that produced them, so a late `ended` or a
/// timer from an earlier stage cannot skip the current one.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum IntroEvent {
    ClipEnded(IntroStage),
    FallbackElapsed(IntroStage),
    Skip,
}

impl IntroStage {
    pub fn initial(reduced_motion: bool) -> Self {
        if reduced_motion {
            IntroStage::Done
        } else {
            IntroStage::Boarding
        }
    }

    pub fn is_done(self) -> bool {
        self == IntroStage::Done
    }

    fn next(self) -> Self {
        match self {
            IntroStage::Boarding => IntroStage::Cabin,
            IntroStage::Cabin | IntroStage::Done => IntroStage::Done,
        }
    }

    pub fn on_event(self, event: IntroEvent) -> Self {
        match event {
            IntroEvent::Skip => IntroStage::Done,
            IntroEvent::ClipEnded(stage) | IntroEvent::FallbackElapsed(stage) if stage == self => self.next(),
            _ => self,
        }
    }
}

impl Reducible for IntroStage {
    type Action = IntroEvent;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let next = self.on_event(action);
        if next == *self {
            self
        } else {
            Rc::new(next)
        }
    }
}

struct Clip {
    stage: IntroStage,
    poster: &'static str,
    sources: [&'static str; 2],
}

static CLIPS: [Clip; 2] = [
    Clip {
        stage: IntroStage::Boarding,
        poster: "https://images.unsplash.com/photo-1502920917128-1aa500764b8a?q=80&w=1920&auto=format&fit=crop",
        sources: [
            "https://videos.pexels.com/video-files/3189745/3189745-uhd_2560_1440_25fps.mp4",
            "https://videos.pexels.com/video-files/5716009/5716009-uhd_2560_1440_24fps.mp4",
        ],
    },
    Clip {
        stage: IntroStage::Cabin,
        poster: "https://images.unsplash.com/photo-1526481280698-8fcc13fd1b4a?q=80&w=1920&auto=format&fit=crop",
        sources: [
            "https://videos.pexels.com/video-files/4969949/4969949-uhd_2560_1440_24fps.mp4",
            "https://videos.pexels.com/video-files/5075882/5075882-uhd_2560_1440_25fps.mp4",
        ],
    },
];

#[derive(Properties, PartialEq)]
pub struct IntroOverlayProps {
    pub on_finish: Callback<()>,
}

/// Full-screen boarding and cabin clips shown before the page is revealed.
#[function_component]
pub fn IntroOverlay(props: &IntroOverlayProps) -> Html {
    let stage = use_reducer(|| IntroStage::initial(prefers_reduced_motion()));
    let visible = use_state(|| !stage.is_done());
    let finished = use_state(|| false);
    let boarding_ref = use_node_ref();
    let cabin_ref = use_node_ref();

    // Play the clip for the current stage and arm its fallback.
    {
        let dispatcher = stage.dispatcher();
        let boarding_ref = boarding_ref.clone();
        let cabin_ref = cabin_ref.clone();
        use_effect_with_deps(
            move |current: &IntroStage| {
                let current = *current;
                let clip = match current {
                    IntroStage::Boarding => boarding_ref.cast::<HtmlVideoElement>(),
                    IntroStage::Cabin => cabin_ref.cast::<HtmlVideoElement>(),
                    IntroStage::Done => None,
                };
                if let Some(video) = clip {
                    start_playback(&video, "intro");
                }
                let fallback = (!current.is_done()).then(|| {
                    Timeout::new(config::INTRO_CLIP_FALLBACK_MS, move || {
                        dispatcher.dispatch(IntroEvent::FallbackElapsed(current));
                    })
                });
                move || drop(fallback)
            },
            *stage,
        );
    }

    // Fade out, then hand control back to the page.
    {
        let visible = visible.clone();
        let finished = finished.clone();
        let on_finish = props.on_finish.clone();
        use_effect_with_deps(
            move |current: &IntroStage| {
                let handoff = current.is_done().then(|| {
                    visible.set(false);
                    Timeout::new(config::INTRO_FADE_OUT_MS, move || {
                        log::info!("Intro finished");
                        finished.set(true);
                        on_finish.emit(());
                    })
                });
                move || drop(handoff)
            },
            *stage,
        );
    }

    if *finished {
        return html! {};
    }

    let skip = {
        let dispatcher = stage.dispatcher();
        Callback::from(move |_: MouseEvent| dispatcher.dispatch(IntroEvent::Skip))
    };

    let clips = CLIPS.iter().map(|clip| {
        let node = if clip.stage == IntroStage::Boarding { boarding_ref.clone() } else { cabin_ref.clone() };
        let on_ended = {
            let dispatcher = stage.dispatcher();
            let clip_stage = clip.stage;
            Callback::from(move |_: Event| dispatcher.dispatch(IntroEvent::ClipEnded(clip_stage)))
        };
        let shown = *stage == clip.stage;
        html! {
            <video
                ref={node}
                class={classes!(
                    "absolute", "inset-0", "w-full", "h-full", "object-cover",
                    "transition-opacity", "duration-[900ms]",
                    if shown { "opacity-100" } else { "opacity-0" }
                )}
                autoplay={clip.stage == IntroStage::Boarding}
                muted=true
                playsinline=true
                preload="metadata"
                aria-hidden="true"
                poster={clip.poster}
                onended={on_ended}
            >
                { for clip.sources.iter().map(|src| html! { <source src={*src} type="video/mp4" /> }) }
            </video>
        }
    });

    html! {
        <div class={classes!(
            "fixed", "inset-0", "z-[60]", "transition-opacity", "duration-500",
            if *visible { "opacity-100" } else { "opacity-0" },
            if *visible { "pointer-events-auto" } else { "pointer-events-none" }
        )}>
            <div class="absolute inset-0 bg-gradient-to-b from-[#0b1020] via-[#0a0f1c] to-[#060914]"></div>

            if !stage.is_done() {
                { for clips }
            }

            <div class="absolute inset-0 bg-[radial-gradient(1200px_600px_at_50%_-10%,rgba(255,255,255,0.25),transparent_60%)]"></div>
            <div class="absolute inset-0 bg-black/40"></div>

            <div class="absolute inset-0 flex flex-col items-center justify-center text-white text-center px-6">
                <div class="backdrop-blur-[1px]">
                    <div class="text-4xl md:text-6xl font-black tracking-tight drop-shadow-[0_6px_24px_rgba(0,0,0,.45)]">{"JetLegs"}</div>
                    <div class="mt-2 text-sky-200/90 md:text-lg">{"Empty-leg luxury, without the full price tag."}</div>
                </div>
                if !stage.is_done() {
                    <button
                        onclick={skip}
                        class="pointer-events-auto mt-8 px-4 py-2 rounded-full bg-white/10 hover:bg-white/20 border border-white/20 text-sm"
                    >
                        {"Skip intro"}
                    </button>
                }
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reduced_motion_starts_done() {
        assert_eq!(IntroStage::initial(true), IntroStage::Done);
        assert_eq!(IntroStage::initial(false), IntroStage::Boarding);
    }

    #[test]
    fn clips_advance_in_order() {
        let stage = IntroStage::Boarding.on_event(IntroEvent::ClipEnded(IntroStage::Boarding));
        assert_eq!(stage, IntroStage::Cabin);
        let stage = stage.on_event(IntroEvent::ClipEnded(IntroStage::Cabin));
        assert_eq!(stage, IntroStage::Done);
    }

    #[test]
    fn fallbacks_alone_reach_done() {
        let mut stage = IntroStage::initial(false);
        for _ in 0..2 {
            stage = stage.on_event(IntroEvent::FallbackElapsed(stage));
        }
        assert!(stage.is_done());
    }

    #[test]
    fn stale_events_are_ignored() {
        let cabin = IntroStage::Cabin;
        assert_eq!(cabin.on_event(IntroEvent::FallbackElapsed(IntroStage::Boarding)), cabin);
        assert_eq!(cabin.on_event(IntroEvent::ClipEnded(IntroStage::Boarding)), cabin);
    }

    #[test]
    fn skip_is_immediate_from_any_stage() {
        for stage in [IntroStage::Boarding, IntroStage::Cabin, IntroStage::Done] {
            assert_eq!(stage.on_event(IntroEvent::Skip), IntroStage::Done);
        }
    }

    #[test]
    fn done_is_terminal() {
        let done = IntroStage::Done;
        assert_eq!(done.on_event(IntroEvent::ClipEnded(IntroStage::Done)), done);
        assert_eq!(done.on_event(IntroEvent::FallbackElapsed(IntroStage::Done)), done);
    }

    #[test]
    fn reducer_keeps_identity_when_nothing_changes() {
        let stage = Rc::new(IntroStage::Cabin);
        let same = stage.clone().reduce(IntroEvent::ClipEnded(IntroStage::Boarding));
        assert!(Rc::ptr_eq(&stage, &same));
        let done = stage.reduce(IntroEvent::Skip);
        assert_eq!(*done, IntroStage::Done);
    }
}
