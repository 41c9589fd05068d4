use crate::audio::WebAudio;
use crate::scheduler::GlooScheduler;
use crate::utils::*;
use bitflags::bitflags;
use clap::Args;
use serde::{Deserialize, Serialize};
use whackamole_core as game;
use yew::prelude::*;

type WebSession = game::Session<GlooScheduler, game::RandomRoll, WebAudio>;

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
    struct MouseButtons: u16 {
        const LEFT    = 1;
        const RIGHT   = 1 << 1;
        const MIDDLE  = 1 << 2;
        const BACK    = 1 << 3;
        const FORWARD = 1 << 4;
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Start,
    Whack(game::CellIndex),
    Timer(game::TimerEvent),
}

fn start_label(state: game::SessionState) -> &'static str {
    use game::SessionState::*;
    match state {
        Idle => "Start",
        Running => "Restart",
        Ended(_) => "Play again",
    }
}

fn summary(snapshot: &game::Snapshot) -> Option<String> {
    match snapshot.end_cause()? {
        game::EndCause::TimeExpired => {
            Some(format!("Time's up! Final score: {}", snapshot.score))
        }
    }
}

fn hole_classes(content: game::CellContent) -> Classes {
    use game::CellContent::*;
    match content {
        Empty => classes!("hole"),
        Mole => classes!("hole", "up", "mole"),
        Bomb => classes!("hole", "up", "bomb"),
    }
}

#[derive(Properties, Clone, PartialEq)]
struct HoleProps {
    index: game::CellIndex,
    content: game::CellContent,
    #[prop_or_default]
    locked: bool,
    callback: Callback<game::CellIndex>,
}

#[function_component(HoleView)]
fn hole_component(props: &HoleProps) -> Html {
    let HoleProps {
        index,
        content,
        locked,
        callback,
    } = props.clone();

    let mut class = hole_classes(content);
    if locked {
        class.push("locked");
    }

    let onpointerdown = Callback::from(move |e: PointerEvent| {
        let buttons = MouseButtons::from_bits_truncate(e.buttons());
        log::trace!("hole {} pointer down ({:?})", index, buttons);
        if buttons.contains(MouseButtons::LEFT) {
            callback.emit(index);
        }
    });

    html! {
        <td {class} aria-label={content.label()} {onpointerdown}/>
    }
}

#[derive(Args, Properties, Debug, Clone, Default, PartialEq)]
pub(crate) struct GameProps {
    /// Force a seed instead of random
    #[arg(short, long)]
    #[prop_or_default]
    pub(crate) seed: Option<u64>,

    /// Start with sound off
    #[arg(long)]
    #[prop_or_default]
    pub(crate) mute: bool,
}

#[derive(Debug)]
pub(crate) struct GameView {
    session: WebSession,
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props();
        let seed = props.seed.unwrap_or_else(js_random_seed);
        log::debug!("seed: {}", seed);

        let scheduler = GlooScheduler::new(ctx.link().callback(Msg::Timer));
        let session = game::Session::new(
            game::GameConfig::default(),
            scheduler,
            game::RandomRoll::new(seed),
            WebAudio::new(props.mute),
        );
        Self { session }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        let updated = match msg {
            Start => {
                self.session.start();
                true
            }
            Whack(index) => match self.session.whack(index.into()) {
                Ok(outcome) => outcome.has_update(),
                Err(err) => {
                    log::warn!("whack rejected: {}", err);
                    false
                }
            },
            Timer(event) => self.session.handle(event).has_update(),
        };

        log::trace!(
            "{:?} -> update: {}, timers: {}",
            msg,
            updated,
            self.session.scheduler().pending()
        );
        updated
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let snapshot = self.session.snapshot();
        let (rows, cols) = snapshot.size;
        let locked = !snapshot.is_running();
        let score = format_for_counter(snapshot.score);
        let time_left = format_for_counter(snapshot.time_remaining.into());
        let label = start_label(snapshot.state);

        let cb_start = ctx.link().callback(|e: MouseEvent| {
            e.stop_propagation();
            Msg::Start
        });
        let cb_whack = ctx.link().callback(Msg::Whack);

        html! {
            <div class="whackamole" oncontextmenu={Callback::from(move |e: MouseEvent| e.prevent_default())}>
                <nav>
                    <aside aria-label="score">{score}</aside>
                    <span><button onclick={cb_start}>{label}</button></span>
                    <aside aria-label="seconds left">{time_left}</aside>
                </nav>
                <table class={snapshot.is_running().then_some("playable")}>
                    {
                        for (0..rows).map(|row| html! {
                            <tr>
                                {
                                    for (0..cols).map(|col| {
                                        let index = row * cols + col;
                                        let content = snapshot
                                            .cells
                                            .get(usize::from(index))
                                            .copied()
                                            .unwrap_or_default();
                                        let callback = cb_whack.clone();
                                        html! {
                                            <HoleView {index} {content} {locked} {callback}/>
                                        }
                                    })
                                }
                            </tr>
                        })
                    }
                </table>
                if let Some(text) = summary(&snapshot) {
                    <p class="summary" role="status">{text}</p>
                }
            </div>
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game::{CellContent, EndCause, SessionState, Snapshot};

    fn snapshot(score: game::Score, state: SessionState) -> Snapshot {
        Snapshot {
            score,
            time_remaining: 0,
            size: (3, 3),
            cells: vec![CellContent::Empty; 9],
            state,
        }
    }

    #[test]
    fn summary_only_after_the_game_ends() {
        assert_eq!(summary(&snapshot(30, SessionState::Running)), None);
        assert_eq!(summary(&snapshot(0, SessionState::Idle)), None);
        assert_eq!(
            summary(&snapshot(-20, SessionState::Ended(EndCause::TimeExpired))).as_deref(),
            Some("Time's up! Final score: -20")
        );
    }

    #[test]
    fn start_button_label_follows_state() {
        assert_eq!(start_label(SessionState::Idle), "Start");
        assert_eq!(start_label(SessionState::Running), "Restart");
        assert_eq!(
            start_label(SessionState::Ended(EndCause::TimeExpired)),
            "Play again"
        );
    }

    #[test]
    fn showing_holes_get_content_classes() {
        assert_eq!(hole_classes(CellContent::Empty), classes!("hole"));
        assert_eq!(
            hole_classes(CellContent::Bomb),
            classes!("hole", "up", "bomb")
        );
    }

    #[test]
    fn only_primary_button_counts() {
        let buttons = MouseButtons::from_bits_truncate(0b11);

        assert!(buttons.contains(MouseButtons::LEFT));
        assert!(!MouseButtons::RIGHT.contains(MouseButtons::LEFT));
    }
}
