//! Headless scenario run

use anyhow::{Context, Result};
use trackline_core::Vec3;
use trackline_motion::{ActorSlot, FailingLoader, ImmediateLoader, MotionEvent, NodeHandle};
use trackline_scenario::{Scenario, TickReport};
use winit::keyboard::KeyCode;

/// Pixels of pointer motion per frame while a drag is held
const DRAG_STEP: f64 = 4.0;

pub struct SimulateArgs {
    pub scenario: String,
    pub frames: u64,
    pub dt: f64,
    pub press: Vec<(u64, KeyCode)>,
    pub drag: Vec<(u64, u64)>,
    pub fail_load: bool,
    pub every: u64,
}

pub fn run(args: SimulateArgs) -> Result<()> {
    let loaded = if args.fail_load {
        let loader = FailingLoader {
            reason: "load failure requested".into(),
        };
        Scenario::load(&args.scenario, &loader)
    } else {
        Scenario::load(&args.scenario, &ImmediateLoader)
    };
    let mut scenario: Scenario<NodeHandle> =
        loaded.with_context(|| format!("Failed to load scenario '{}'", args.scenario))?;

    println!(
        "Simulating '{}' for {} frames at {:.4}s",
        scenario.name(),
        args.frames,
        args.dt
    );

    let every = args.every.max(1);
    let mut pointer_x = 0.0;
    for frame in 0..args.frames {
        for (_, key) in args.press.iter().filter(|(at, _)| *at == frame) {
            scenario.key_down(*key);
        }
        for &(start, end) in &args.drag {
            if frame == start {
                scenario.pointer_down();
                scenario.pointer_move(pointer_x, 0.0);
            } else if frame > start && frame < end {
                pointer_x += DRAG_STEP;
                scenario.pointer_move(pointer_x, 0.0);
            } else if frame == end {
                scenario.pointer_up();
            }
        }

        let report = scenario.tick(args.dt);
        print_events(&scenario, &report);
        if frame % every == 0 || frame + 1 == args.frames {
            print_pose(&scenario, frame);
        }

        for (_, key) in args.press.iter().filter(|(at, _)| *at == frame) {
            scenario.key_up(*key);
        }
    }

    if let ActorSlot::Failed(failure) = scenario.slot() {
        println!("Actor never loaded: {}", failure);
    }
    Ok(())
}

fn print_events(scenario: &Scenario<NodeHandle>, report: &TickReport) {
    let curve_name = |id| scenario.curves().name(id).unwrap_or("?");
    for (trigger, curve) in &report.switched {
        println!("  [{}] '{}' -> {}", report.frame, trigger, curve_name(*curve));
    }
    for err in &report.rejected {
        println!("  [{}] rejected: {}", report.frame, err);
    }
    let Some(motion) = &report.motion else {
        return;
    };
    for event in &motion.events {
        let text = match event {
            MotionEvent::JunctionReached(id) => {
                let name = scenario.junctions().get(*id).map(|j| j.name.as_str());
                format!("reached junction '{}'", name.unwrap_or("?"))
            }
            MotionEvent::Wrapped => "wrapped".to_string(),
            MotionEvent::Restarted => "restarted on home path".to_string(),
            MotionEvent::Parked => "parked at end of path".to_string(),
        };
        println!("  [{}] {}", report.frame, text);
    }
}

fn print_pose(scenario: &Scenario<NodeHandle>, frame: u64) {
    let actor = match scenario.slot() {
        ActorSlot::Ready(actor) => actor,
        ActorSlot::Pending { progress, .. } => {
            println!("{:>5}  loading {:.0}%", frame, progress * 100.0);
            return;
        }
        ActorSlot::Failed(_) => {
            println!("{:>5}  load failed", frame);
            return;
        }
    };
    let curve = scenario.curves().name(actor.curve()).unwrap_or("?");
    println!(
        "{:>5}  {:<10} t={:.3}  pos={}  cam={}  look={}  {:?}",
        frame,
        curve,
        actor.t(),
        fmt_vec(actor.position()),
        fmt_vec(scenario.camera().position),
        fmt_vec(scenario.camera().target),
        scenario.rig().mode()
    );
}

fn fmt_vec(v: Vec3) -> String {
    format!("({:.1}, {:.1}, {:.1})", v.x, v.y, v.z)
}
