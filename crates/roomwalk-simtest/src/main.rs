//! Roomwalk Headless Walk Harness
//!
//! Validates pure navigation logic and the demo world without a renderer.
//! Runs entirely in-process: no window, no input devices, no launching.
//!
//! Usage:
//!   cargo run -p roomwalk-simtest
//!   cargo run -p roomwalk-simtest -- --verbose

use roomwalk_logic::bounds::{BoundingBox, Direction, Point, Size};
use roomwalk_logic::collision::{aabb_overlap, app_near, wall_blocks};
use roomwalk_logic::config::WorldConfig;
use roomwalk_logic::geometry::{self, Severity};
use roomwalk_logic::motion::MoveResult;
use roomwalk_logic::room::{Application, Wall, WallKind};
use roomwalk_logic::session::Session;
use roomwalk_logic::transform::{self, Viewport};

// ── Demo world (same JSON the desktop shell ships) ──────────────────────
const WORLD_JSON: &str = include_str!("../../../data/demo_world.json");

const WIDTH: f64 = 1000.0;
const HEIGHT: f64 = 800.0;

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn main() {
    let verbose = std::env::args().any(|a| a == "--verbose");
    if verbose {
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Debug)
            .init();
    }
    println!("=== Roomwalk Walk Harness ===\n");

    let mut results = Vec::new();

    // Debug logging is on exactly when asked for
    let debug_logging = log::log_enabled!(log::Level::Debug);
    results.push(TestResult {
        name: "logging_follows_verbose".into(),
        passed: debug_logging == verbose,
        detail: format!("verbose={} debug logging={}", verbose, debug_logging),
    });

    // 1. Demo world config & layout validation
    let world = validate_world_config(&mut results, verbose);

    // 2. Percent ↔ pixel transforms
    results.extend(validate_transforms(verbose));

    // 3. Collision primitives
    results.extend(validate_collision(verbose));

    if let Some(world) = world {
        // 4. Scripted tour through every door
        results.extend(validate_walk_tour(&world, verbose));

        // 5. Walls hold the actor in
        results.extend(validate_blocking(&world, verbose));

        // 6. Edit commits & reload
        results.extend(validate_edits(&world, verbose));

        // 7. Viewport sweep
        results.extend(validate_viewport_sweep(&world, verbose));
    }

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── Helpers ─────────────────────────────────────────────────────────────

fn start_session(world: &WorldConfig, width: f64, height: f64) -> Result<Session, String> {
    Session::new(world.clone(), width, height).map_err(|e| e.to_string())
}

/// Step in `dir` until something other than a plain move happens.
fn walk_until_event(session: &mut Session, dir: Direction, max_steps: usize) -> MoveResult {
    let mut last = MoveResult::Moved {
        nearby_application: None,
    };
    for _ in 0..max_steps {
        last = session.step(dir);
        if !matches!(last, MoveResult::Moved { .. }) {
            break;
        }
    }
    last
}

/// True when the actor box sits inside the viewport and clear of walls.
fn actor_is_placed_cleanly(session: &Session) -> bool {
    let pos = session.actor().position();
    let size = session.actor_size();
    let inside = session
        .viewport()
        .bounds()
        .covers(&BoundingBox::at(pos, size));
    inside && !wall_blocks(pos, size, &session.room().walls)
}

fn fmt_point(p: Point) -> String {
    format!("({:.1},{:.1})", p.x, p.y)
}

// ── 1. World Config ─────────────────────────────────────────────────────

fn validate_world_config(results: &mut Vec<TestResult>, verbose: bool) -> Option<WorldConfig> {
    println!("--- World Config ---");

    let world = match WorldConfig::from_json(WORLD_JSON) {
        Ok(w) => w,
        Err(e) => {
            results.push(TestResult {
                name: "world_parse".into(),
                passed: false,
                detail: format!("JSON parse error: {}", e),
            });
            return None;
        }
    };

    results.push(TestResult {
        name: "world_has_rooms".into(),
        passed: world.rooms.len() >= 3 && world.has_room(&world.start_room),
        detail: format!(
            "{} rooms, start room '{}'",
            world.rooms.len(),
            world.start_room
        ),
    });

    let findings = geometry::validate_world(&world);
    let errors = findings
        .iter()
        .filter(|f| f.severity == Severity::Error)
        .count();
    results.push(TestResult {
        name: "world_layout_valid".into(),
        passed: findings.is_empty(),
        detail: if findings.is_empty() {
            "no layout findings".into()
        } else {
            format!(
                "{} findings ({} errors), first: {}",
                findings.len(),
                errors,
                findings[0].message
            )
        },
    });

    // Every door has a reciprocal, so no traversal should fall back
    let one_way = geometry::check_reciprocal_doors(&world).len();
    results.push(TestResult {
        name: "world_doors_paired".into(),
        passed: one_way == 0,
        detail: format!("{} one-way doors", one_way),
    });

    let has_self_loop = world
        .rooms
        .iter()
        .any(|(id, room)| room.doors.values().any(|d| &d.leads_to == id));
    results.push(TestResult {
        name: "world_has_self_loop".into(),
        passed: has_self_loop,
        detail: format!("self-loop present: {}", has_self_loop),
    });

    let round_trip = world
        .to_json_pretty()
        .and_then(|json| WorldConfig::from_json(&json));
    results.push(TestResult {
        name: "world_json_round_trip".into(),
        passed: matches!(&round_trip, Ok(back) if back == &world),
        detail: match &round_trip {
            Ok(_) => "serialize → parse reproduces the config".into(),
            Err(e) => format!("round trip failed: {}", e),
        },
    });

    if verbose {
        for (id, room) in &world.rooms {
            println!(
                "  {:8} walls={} doors={} apps={}",
                id,
                room.walls.len(),
                room.doors.len(),
                room.applications.len()
            );
        }
    }

    Some(world)
}

// ── 2. Transforms ───────────────────────────────────────────────────────

fn validate_transforms(verbose: bool) -> Vec<TestResult> {
    println!("--- Transforms ---");
    let mut results = Vec::new();

    let vp = transform::default_viewport(WIDTH, HEIGHT);
    results.push(TestResult {
        name: "viewport_wall_thickness".into(),
        passed: vp.wall_thickness_x == 70.0 && vp.wall_thickness_y == 56.0,
        detail: format!(
            "{}×{} → thickness {}×{}",
            vp.width, vp.height, vp.wall_thickness_x, vp.wall_thickness_y
        ),
    });

    let top = transform::wall_to_pixels(
        "top",
        &roomwalk_logic::config::WallConfig::new(0.0, 0.0, 100.0, 7.0),
        &vp,
    );
    results.push(TestResult {
        name: "top_wall_pixels".into(),
        passed: top.bounds == BoundingBox::new(0.0, 0.0, WIDTH, 56.0),
        detail: format!("{:?}", top.bounds),
    });

    // percent → pixel → percent across awkward sizes
    let mut worst: f64 = 0.0;
    for &d in &[1.0, 333.0, 768.0, 1366.0, 2560.0, 12345.6] {
        for &p in &[0.0, 0.5, 7.0, 12.5, 33.3, 50.0, 93.0, 100.0] {
            let back = transform::pixel_to_percent(transform::percent_to_pixel(p, d), d);
            worst = worst.max((back - p).abs());
        }
    }
    results.push(TestResult {
        name: "percent_round_trip".into(),
        passed: worst < 1e-9,
        detail: format!("max drift {:.2e}", worst),
    });

    results.push(TestResult {
        name: "zero_dimension_percent".into(),
        passed: transform::pixel_to_percent(42.0, 0.0) == 0.0,
        detail: "pixel_to_percent(v, 0) = 0".into(),
    });

    if verbose {
        println!("  viewport center {}", fmt_point(vp.center()));
    }

    results
}

// ── 3. Collision ────────────────────────────────────────────────────────

fn validate_collision(_verbose: bool) -> Vec<TestResult> {
    println!("--- Collision ---");
    let mut results = Vec::new();

    let a = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
    let touching = BoundingBox::new(10.0, 0.0, 10.0, 10.0);
    let inside = BoundingBox::new(9.0, 9.0, 5.0, 5.0);
    results.push(TestResult {
        name: "aabb_shared_edge".into(),
        passed: !aabb_overlap(&a, &touching) && aabb_overlap(&a, &inside),
        detail: "touching edges are not overlap".into(),
    });

    let nan = BoundingBox::new(f64::NAN, 0.0, 10.0, 10.0);
    results.push(TestResult {
        name: "aabb_nan".into(),
        passed: !aabb_overlap(&a, &nan) && !aabb_overlap(&nan, &a),
        detail: "NaN geometry never collides".into(),
    });

    let actor = Size::new(32.0, 32.0);
    let walls = vec![Wall {
        id: "w".into(),
        kind: WallKind::Custom,
        bounds: BoundingBox::new(32.0, 0.0, 10.0, 100.0),
    }];
    results.push(TestResult {
        name: "wall_flush_not_blocking".into(),
        passed: !wall_blocks(Point::new(0.0, 0.0), actor, &walls)
            && wall_blocks(Point::new(1.0, 0.0), actor, &walls),
        detail: "flush is free, 1px in is blocked".into(),
    });

    let apps = vec![Application {
        id: "t".into(),
        bounds: BoundingBox::new(100.0, 100.0, 40.0, 40.0),
        name: "T".into(),
        command: None,
        rotation: None,
        menu_items: vec![],
    }];
    let pos = Point::new(68.0, 80.0);
    results.push(TestResult {
        name: "app_proximity_pickup".into(),
        passed: app_near(pos, actor, &apps).is_some()
            && !aabb_overlap(&BoundingBox::at(pos, actor), &apps[0].bounds),
        detail: format!("actor at {} picks up without overlap", fmt_point(pos)),
    });

    results
}

// ── 4. Walk Tour ────────────────────────────────────────────────────────

enum Leg {
    /// Take exactly n free steps.
    Steps(Direction, usize),
    /// Walk until a transition into the named room.
    Through(Direction, &'static str),
}

fn validate_walk_tour(world: &WorldConfig, verbose: bool) -> Vec<TestResult> {
    println!("--- Walk Tour ---");
    let mut results = Vec::new();

    let mut session = match start_session(world, WIDTH, HEIGHT) {
        Ok(s) => s,
        Err(e) => {
            results.push(TestResult {
                name: "tour_session".into(),
                passed: false,
                detail: e,
            });
            return results;
        }
    };

    // foyer ↑ library ↓ foyer → gallery ⟲ gallery ← foyer
    let legs = [
        Leg::Through(Direction::Up, "library"),
        Leg::Through(Direction::Down, "foyer"),
        Leg::Steps(Direction::Down, 25),
        Leg::Through(Direction::Right, "gallery"),
        Leg::Steps(Direction::Up, 10),
        Leg::Through(Direction::Right, "gallery"),
        Leg::Steps(Direction::Up, 24),
        Leg::Through(Direction::Left, "foyer"),
    ];

    let mut transitions = 0;
    for (i, leg) in legs.iter().enumerate() {
        match *leg {
            Leg::Steps(dir, n) => {
                let blocked = (0..n)
                    .map(|_| session.step(dir))
                    .filter(|r| !matches!(r, MoveResult::Moved { .. }))
                    .count();
                if blocked > 0 {
                    results.push(TestResult {
                        name: format!("tour_leg_{}", i),
                        passed: false,
                        detail: format!("{} of {} steps {} did not move", blocked, n, dir),
                    });
                }
            }
            Leg::Through(dir, expected) => {
                let from = session.current_room_id().to_string();
                let result = walk_until_event(&mut session, dir, 200);
                let ok = matches!(&result, MoveResult::Transitioned { room_id } if room_id == expected);
                if ok {
                    transitions += 1;
                }
                if verbose {
                    println!(
                        "  {} → {} via {}: {:?}, actor at {}",
                        from,
                        session.current_room_id(),
                        dir,
                        result,
                        fmt_point(session.actor().position())
                    );
                }
                results.push(TestResult {
                    name: format!("tour_{}_to_{}", from, expected),
                    passed: ok && actor_is_placed_cleanly(&session),
                    detail: format!(
                        "{:?}, entered at {}",
                        result,
                        fmt_point(session.actor().position())
                    ),
                });
            }
        }
    }

    results.push(TestResult {
        name: "tour_complete".into(),
        passed: transitions == 5 && session.current_room_id() == "foyer",
        detail: format!(
            "{} transitions, ended in '{}'",
            transitions,
            session.current_room_id()
        ),
    });

    // The self-loop re-enters beside mirror_in
    let mut session = match start_session(world, WIDTH, HEIGHT) {
        Ok(s) => s,
        Err(_) => return results,
    };
    let loop_entry = session
        .traverse("east")
        .and_then(|_| session.traverse("mirror_out"))
        .map(|_| session.actor().position());
    let expected = session
        .room()
        .door("mirror_in")
        .map(|d| Point::new(d.bounds.right() + 15.0, d.bounds.center().y - 16.0));
    results.push(TestResult {
        name: "self_loop_entry".into(),
        passed: matches!((&loop_entry, expected), (Ok(p), Some(e)) if *p == e),
        detail: format!("{:?} expected {:?}", loop_entry, expected),
    });

    results
}

// ── 5. Blocking ─────────────────────────────────────────────────────────

fn validate_blocking(world: &WorldConfig, _verbose: bool) -> Vec<TestResult> {
    println!("--- Blocking ---");
    let mut results = Vec::new();

    let mut session = match start_session(world, WIDTH, HEIGHT) {
        Ok(s) => s,
        Err(e) => {
            results.push(TestResult {
                name: "blocking_session".into(),
                passed: false,
                detail: e,
            });
            return results;
        }
    };

    // The bench sits under the start position
    let down = walk_until_event(&mut session, Direction::Down, 200);
    let bench = session.room().wall("bench").map(|w| w.bounds);
    let actor_bottom = session.actor().y + session.actor_size().height;
    results.push(TestResult {
        name: "bench_blocks_walk_down".into(),
        passed: down == MoveResult::Blocked
            && bench.map_or(false, |b| actor_bottom <= b.y && actor_bottom > b.y - 10.0),
        detail: format!("stopped with bottom edge at {:.1}", actor_bottom),
    });

    // A blocked step changes nothing at all
    let before = *session.actor();
    let again = session.step(Direction::Down);
    results.push(TestResult {
        name: "blocked_step_is_noop".into(),
        passed: again == MoveResult::Blocked && *session.actor() == before,
        detail: format!("{:?}", session.actor()),
    });

    for dir in [Direction::Left, Direction::Up] {
        let result = walk_until_event(&mut session, dir, 200);
        results.push(TestResult {
            name: format!("edge_wall_blocks_{}", dir),
            passed: result == MoveResult::Blocked && actor_is_placed_cleanly(&session),
            detail: format!("stopped at {}", fmt_point(session.actor().position())),
        });
    }

    session.stop_moving();
    results.push(TestResult {
        name: "stop_moving_clears_flag".into(),
        passed: !session.actor().is_moving,
        detail: format!("frame {} kept", session.actor().frame),
    });

    results
}

// ── 6. Edits ────────────────────────────────────────────────────────────

fn validate_edits(world: &WorldConfig, _verbose: bool) -> Vec<TestResult> {
    println!("--- Edits ---");
    let mut results = Vec::new();

    let mut session = match start_session(world, WIDTH, HEIGHT) {
        Ok(s) => s,
        Err(e) => {
            results.push(TestResult {
                name: "edits_session".into(),
                passed: false,
                detail: e,
            });
            return results;
        }
    };

    let dragged = BoundingBox::new(600.0, 200.0, 35.0, 28.0);
    let committed = session.commit_application("terminal", dragged);
    let live = session.room().application("terminal").map(|a| a.bounds);
    results.push(TestResult {
        name: "commit_application".into(),
        passed: committed.is_ok() && live == Some(dragged),
        detail: format!("{:?} → {:?}", committed, live),
    });

    let moved_bench = BoundingBox::new(100.0, 640.0, 200.0, 32.0);
    let committed = session.commit_wall("bench", moved_bench);
    let cfg = session
        .config()
        .room("foyer")
        .and_then(|r| r.walls.get("bench").copied());
    results.push(TestResult {
        name: "commit_wall_percent".into(),
        passed: committed.is_ok()
            && cfg.map_or(false, |w| w.x == 10.0 && w.y == 80.0 && w.width == 20.0),
        detail: format!("{:?}", cfg),
    });

    let unknown = session.commit_door("cellar", moved_bench);
    results.push(TestResult {
        name: "commit_unknown_door".into(),
        passed: unknown.is_err(),
        detail: match unknown {
            Ok(()) => "accepted unknown door".into(),
            Err(e) => e.to_string(),
        },
    });

    // The bench moved out of the way: walking down now reaches the wall
    let edited = session.config().clone();
    let reloaded = session.reload(edited);
    let down = walk_until_event(&mut session, Direction::Down, 200);
    let bottom = session.actor().y + session.actor_size().height;
    results.push(TestResult {
        name: "reload_uses_edits".into(),
        passed: reloaded.is_ok() && down == MoveResult::Blocked && bottom > 700.0,
        detail: format!("walked down to bottom edge {:.1}", bottom),
    });

    results.push(TestResult {
        name: "edited_layout_valid".into(),
        passed: geometry::validate_world(session.config()).is_empty(),
        detail: "edits keep the layout valid".into(),
    });

    results
}

// ── 7. Viewport Sweep ───────────────────────────────────────────────────

fn validate_viewport_sweep(world: &WorldConfig, verbose: bool) -> Vec<TestResult> {
    println!("--- Viewport Sweep ---");
    let mut results = Vec::new();

    let sizes = [(800.0, 600.0), (1366.0, 768.0), (1920.0, 1080.0), (2560.0, 1440.0)];
    let mut failures = Vec::new();
    for &(w, h) in &sizes {
        let mut session = match start_session(world, w, h) {
            Ok(s) => s,
            Err(e) => {
                failures.push(format!("{}×{}: {}", w, h, e));
                continue;
            }
        };
        let vp: Viewport = *session.viewport();
        let there = session.traverse("north");
        let back = session.traverse("south");
        let placed = actor_is_placed_cleanly(&session);
        if verbose {
            println!(
                "  {}×{} thickness {:.1}×{:.1}, back in foyer at {}",
                w,
                h,
                vp.wall_thickness_x,
                vp.wall_thickness_y,
                fmt_point(session.actor().position())
            );
        }
        if there.is_err() || back.is_err() || !placed || session.current_room_id() != "foyer" {
            failures.push(format!("{}×{}", w, h));
        }
    }
    results.push(TestResult {
        name: "viewport_sweep_traversal".into(),
        passed: failures.is_empty(),
        detail: if failures.is_empty() {
            format!("{} viewport sizes round-trip cleanly", sizes.len())
        } else {
            format!("failed at {}", failures.join(", "))
        },
    });

    let bad = start_session(world, 0.0, HEIGHT);
    results.push(TestResult {
        name: "zero_viewport_rejected".into(),
        passed: bad.is_err(),
        detail: match bad {
            Ok(_) => "accepted 0 width".into(),
            Err(e) => e,
        },
    });

    results
}
