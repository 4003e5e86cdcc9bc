//! Rebel Simulation
//! Runs the rebel decision engine against a small demo city for N turns

use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use rebel_ai::core::config::load_config;
use rebel_ai::core::types::{ActorArc, AlertPosture, NodeId, TargetId, TeamKind, ThreatCategory};
use rebel_ai::events::AiEvent;
use rebel_ai::intel::{SightingMessage, SightingSource};
use rebel_ai::persistence::RebelAiSave;
use rebel_ai::state::{Condition, EntityStatus};
use rebel_ai::tasks::TaskKind;
use rebel_ai::world::{Node, Target, TeamCapture};
use rebel_ai::{AiConfig, AiServices, RebelAi, SeededRng, World};

/// Rebel Simulation - autonomous rebels versus a wandering pursuer
#[derive(Parser, Debug)]
#[command(name = "rebel_sim")]
#[command(about = "Run the rebel decision engine on a demo map")]
struct Args {
    /// Random seed for reproducible runs
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Number of turns to play
    #[arg(long, default_value_t = 30)]
    turns: u32,

    /// Config name under data/ai_config
    #[arg(long, default_value = "default")]
    config: String,

    /// Turns an inactive entity stays off the map
    #[arg(long, default_value_t = 2)]
    downtime: u32,

    /// Write the final engine state to this file
    #[arg(long)]
    save: Option<std::path::PathBuf>,

    /// Print every executed task
    #[arg(long, default_value_t = false)]
    verbose: bool,
}

const NODE_NAMES: [&str; 8] = [
    "Docks",
    "Market",
    "Old Town",
    "Foundry",
    "University",
    "Barracks",
    "Harbour",
    "Ministry",
];

/// Ring of eight districts with two cross streets
fn build_world() -> World {
    let mut world = World::new(6);

    for (i, name) in NODE_NAMES.iter().enumerate() {
        world.graph.add_node(Node::new(NodeId(i as u32), name));
    }
    if let Some(n) = world.graph.node_mut(NodeId(5)) {
        n.teams.push(TeamKind::Erasure);
    }
    if let Some(n) = world.graph.node_mut(NodeId(7)) {
        n.teams.push(TeamKind::Control);
        n.spider = true;
        n.security = 3;
    }
    if let Some(n) = world.graph.node_mut(NodeId(4)) {
        n.support = 2;
        n.teams.push(TeamKind::Media);
    }

    let mut links: Vec<(u32, u32)> = (0..8).map(|i| (i, (i + 1) % 8)).collect();
    links.push((0, 4));
    links.push((2, 6));
    for (a, b) in links {
        if let Err(e) = world.graph.connect(NodeId(a), NodeId(b)) {
            tracing::error!(error = %e, "bad demo link");
        }
    }

    world
        .targets
        .add(Target::new(TargetId(0), "Ministry archive", NodeId(7)).requiring(ActorArc::Hacker));
    world
        .targets
        .add(Target::new(TargetId(1), "Foundry payroll", NodeId(3)));
    world.goals = vec![NodeId(3), NodeId(6)];
    world.pursuer_node = Some(NodeId(4));

    world.roster.add("Mara", ActorArc::Blogger, NodeId(1), 3);
    world.roster.add("Ilya", ActorArc::Hacker, NodeId(2), 3);
    world.roster.add("Teo", ActorArc::Fixer, NodeId(0), 3);
    world
}

/// Move the pursuer one step, drifting toward the rebel leader
fn move_pursuer(world: &mut World, leader: NodeId, rng: &mut ChaCha8Rng) {
    let Some(from) = world.pursuer_node else {
        return;
    };
    let next = if rng.gen_bool(0.6) {
        world
            .graph
            .shortest_path(from, leader)
            .and_then(|p| p.get(1).copied())
    } else {
        let options = world.graph.neighbours(from);
        (!options.is_empty()).then(|| options[rng.gen_range(0..options.len())])
    };
    if let Some(next) = next {
        world.pursuer_node = Some(next);
    }
}

/// Sightings the rebels' contacts and tracers pick up this turn
fn collect_sightings(world: &World, rng: &mut ChaCha8Rng) -> Vec<SightingMessage> {
    let mut messages = Vec::new();
    let turn = world.turn;

    if let Some(at) = world.pursuer_node {
        let traced = world.graph.node(at).is_some_and(|n| n.tracer);
        let contact = world
            .roster
            .active()
            .any(|a| a.contacts.contains(&at) || a.node == at);
        if traced {
            messages.push(SightingMessage {
                category: ThreatCategory::Pursuer,
                node: at,
                turn,
                move_number: 0,
                source: SightingSource::Tracer,
            });
        } else if contact || rng.gen_bool(0.3) {
            messages.push(SightingMessage {
                category: ThreatCategory::Pursuer,
                node: at,
                turn,
                move_number: 0,
                source: SightingSource::Contact {
                    reliability: rng.gen_range(0..=3),
                },
            });
        }
    }

    for id in world.graph.node_ids() {
        let erasure = world
            .graph
            .node(id)
            .is_some_and(|n| n.has_team(TeamKind::Erasure));
        if erasure && rng.gen_bool(0.5) {
            messages.push(SightingMessage {
                category: ThreatCategory::EnforcementTeam,
                node: id,
                turn,
                move_number: 1,
                source: SightingSource::Contact {
                    reliability: rng.gen_range(1..=3),
                },
            });
        }
    }
    messages
}

fn main() {
    let args = Args::parse();

    let filter = if args.verbose { "rebel_ai=debug" } else { "rebel_ai=info" };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = match load_config(&args.config) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(error = %e, config = %args.config, "falling back to built-in config");
            AiConfig::new()
        }
    };

    println!("=== REBEL SIMULATION ===");
    println!("Config: {}  Seed: {}  Turns: {}", config.name, args.seed, args.turns);
    println!();

    let mut world = build_world();
    let mut ai = RebelAi::new(config, NodeId(0));
    ai.entity
        .conditions
        .push(Condition::new("gunshot wound", vec![NodeId(2)]));

    let mut capture = TeamCapture;
    let mut decisions = SeededRng::new(args.seed);
    let mut host_rng = ChaCha8Rng::seed_from_u64(args.seed.wrapping_add(1));
    let mut downtime = 0;

    for turn in 1..=args.turns {
        world.turn = turn;
        if turn % 10 == 0 && world.alert < AlertPosture::Crackdown {
            world.alert = match world.alert {
                AlertPosture::Normal => AlertPosture::Apb,
                AlertPosture::Apb => AlertPosture::SecurityAlert,
                _ => AlertPosture::Crackdown,
            };
            println!("Turn {turn}: authority alert raised to {:?}", world.alert);
        }

        move_pursuer(&mut world, ai.entity.node, &mut host_rng);
        for message in collect_sightings(&world, &mut host_rng) {
            ai.ingest_sighting(message);
        }

        if matches!(ai.entity.status, EntityStatus::Inactive(_)) {
            downtime += 1;
            if downtime > args.downtime {
                ai.reactivate();
                downtime = 0;
            }
        }

        let report = {
            let mut services = AiServices::new(&mut world, &mut capture, &mut decisions);
            ai.take_turn(&mut services)
        };

        println!(
            "Turn {:>3}: leader at {:<10} inv {} | {:?} | {} action(s)",
            turn,
            world
                .graph
                .node(ai.entity.node)
                .map(|n| n.name.as_str())
                .unwrap_or("?"),
            ai.entity.invisibility,
            report.status,
            report.actions.len()
        );
        for name in &report.expired_conditions {
            println!("    {name} has run its course untreated");
        }
        if args.verbose {
            for record in &report.actions {
                println!("    {} {:?} -> {:?}", record.actor, record.kind, record.outcome);
            }
        }

        for logged in ai.drain_events() {
            if let AiEvent::CaptureRaised(details) = logged.event {
                println!("    CAPTURE: {} at {} ({:?})", details.actor, details.node, details.cause);
            }
        }

        if report.status == EntityStatus::Captured {
            println!();
            println!("The rebel leader was captured on turn {turn}.");
            break;
        }
    }

    println!();
    println!("Task usage:");
    for kind in [
        TaskKind::Move,
        TaskKind::LieLow,
        TaskKind::StressLeave,
        TaskKind::RoleAction,
        TaskKind::Idle,
        TaskKind::TargetAttempt,
        TaskKind::Cure,
        TaskKind::FactionLobby,
        TaskKind::DismissActor,
    ] {
        println!("  {:<14} {}", format!("{kind:?}"), ai.histogram_count(kind));
    }
    println!(
        "Ledger: gear {}  intel {}  resources {}",
        ai.ledger.gear_pool, ai.ledger.target_intel, ai.ledger.faction_resources
    );
    let live = world.targets.live().count();
    println!("Targets still live: {live}");

    if let Some(path) = args.save {
        if let Err(e) = RebelAiSave::capture(&ai).save_to_path(&path) {
            eprintln!("Failed to save state: {e}");
        }
    }
}
