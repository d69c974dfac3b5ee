//! Decoder Pipeline State Machine
//!
//! Ten decode stages and an end stage wired into a ring. Video and audio
//! decode events advance the ring; every stage also owns an internal table
//! that claims audio decode events, so inside the ring only video events
//! actually move the machine. Resume/pause events match nothing.
//!
//! Key concepts:
//! - One parameterized state type instead of eleven hand-written ones
//! - AND/OR guard composition
//! - Internal tables taking precedence over the outer table
//!
//! Run with: cargo run --example decoder_pipeline
//! Set RUST_LOG=trace to also see rejected rows and lifecycle hooks.

use fsm_table::builder::{EngineBuilder, InternalBuilder, TransitionBuilder};
use fsm_table::core::{Guard, State};
use fsm_table::dispatch::{ActionError, Engine, StateMachine};
use fsm_table::event_enum;
use serde::{Deserialize, Serialize};
use tracing::info;
use tracing_subscriber::EnvFilter;

const STAGE_LABELS: [&str; 10] = [
    "Start", "Start1", "Start2", "Start3", "Start4", "Start5", "Start6", "Start7", "Start8",
    "Start9",
];

#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
enum Stage {
    Decode(u8),
    End,
}

impl Stage {
    const START: Stage = Stage::Decode(0);

    /// All stages in ring order.
    fn ring() -> Vec<Stage> {
        (0..STAGE_LABELS.len() as u8)
            .map(Stage::Decode)
            .chain([Stage::End])
            .collect()
    }
}

impl State for Stage {
    fn name(&self) -> &str {
        match self {
            Stage::Decode(n) => STAGE_LABELS.get(*n as usize).copied().unwrap_or("Decode?"),
            Stage::End => "End",
        }
    }

    fn enter(&self) {
        info!("Entering {}", self.name());
    }

    fn exit(&self) {
        info!("Exiting {}", self.name());
    }
}

event_enum! {
    enum Media {
        VideoDecode,
        AudioDecode,
        AudioResumed,
        AudioPaused,
    }
}

/// Counts what the actions saw.
#[derive(Debug, Default)]
struct Counters {
    outer_actions: usize,
    internal_actions: usize,
}

type Machine = StateMachine<Stage, Counters>;
type StageGuard = Guard<Stage, Media, Counters>;

fn is_decode(label: &'static str) -> StageGuard {
    Guard::new(move |_m: &Machine, event: &Media| {
        let verdict = matches!(event, Media::VideoDecode | Media::AudioDecode);
        info!("{label} {event:?} -> {verdict}");
        verdict
    })
}

fn internal_condition() -> StageGuard {
    Guard::new(|_m: &Machine, event: &Media| {
        let verdict = matches!(event, Media::AudioDecode);
        info!("InternalStartCond {event:?} -> {verdict}");
        verdict
    })
}

fn outer_action(label: &'static str) -> impl Fn(&mut Machine, &Media) -> Result<(), ActionError> {
    move |machine, event| {
        machine.context_mut().outer_actions += 1;
        info!("Action {label} {event:?}");
        Ok(())
    }
}

fn internal_action(machine: &mut Machine, event: &Media) -> Result<(), ActionError> {
    machine.context_mut().internal_actions += 1;
    info!("InternalStartAction {event:?}");
    Ok(())
}

fn build_engine() -> Result<Engine<Stage, Media, Counters>, fsm_table::BuildError> {
    let ring = Stage::ring();
    let mut builder = EngineBuilder::new().states(ring.clone()).initial(Stage::START);

    for pair in ring.windows(2) {
        let (from, to) = (pair[0], pair[1]);
        // the last decode stage lists audio first
        let order = if to == Stage::End {
            [Media::AudioDecode, Media::VideoDecode]
        } else {
            [Media::VideoDecode, Media::AudioDecode]
        };
        for kind in order {
            builder = builder.transition(
                TransitionBuilder::new()
                    .on(kind)
                    .from(from)
                    .to(to)
                    .action(outer_action("EndFSM"))
                    .guard(Guard::and([is_decode("IsStart"), is_decode("ReturnsTrue")])),
            )?;
        }
        for kind in [Media::VideoDecode, Media::AudioDecode] {
            builder = builder.internal(
                from,
                InternalBuilder::new()
                    .on(kind)
                    .action(internal_action)
                    .guard(internal_condition()),
            )?;
        }
    }

    for kind in [Media::VideoDecode, Media::AudioDecode] {
        builder = builder.transition(
            TransitionBuilder::new()
                .on(kind)
                .from(Stage::End)
                .to(Stage::START)
                .action(outer_action("StartFSM"))
                .guard(Guard::or([is_decode("IsStart"), is_decode("ReturnsTrue")])),
        )?;
    }

    builder.build()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .compact()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .init();

    let engine = build_engine()?;
    let mut machine = engine.start(Counters::default());

    for i in 0..100 {
        let event = match i % 4 {
            0 => Media::VideoDecode,
            1 => Media::AudioDecode,
            2 => Media::AudioResumed,
            _ => Media::AudioPaused,
        };
        let handled = engine.on_event(&mut machine, &event)?;
        info!(
            handled,
            state = machine.current_state().map(Stage::name).unwrap_or("-"),
            "Iteration {i} ================="
        );
    }

    let counters = machine.context();
    info!(
        outer_actions = counters.outer_actions,
        internal_actions = counters.internal_actions,
        transitions = machine.history().transitions().len(),
        "done"
    );
    Ok(())
}
