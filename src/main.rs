use std::env;
use std::io::{self, Write};
use std::path::PathBuf;

use tracing_subscriber::EnvFilter;

use underworld_careers::components::world::CharacterId;
use underworld_careers::content::JobCatalog;
use underworld_careers::data::{default_career_catalog, load_career_catalog, load_tuning};
use underworld_careers::rules::resume::DeclaredSkills;
use underworld_careers::simulation::application::AttemptId;
use underworld_careers::world::WorldDb;
use underworld_careers::{AnswerStrategy, CareerEngine, CareerTuning, CharacterProfile, JobTierId};

const COMMANDS: &str = "Commands: new <name> [level=n] [charisma=n] [skill=v..] | chars | use <id> | jobs | apply <tier> [skill=v..] | answer <honest|confident|charm> | finalize | work | social | promote | resign | day [n] | status | save <path> | load <path> | quit";

struct Args {
    world: PathBuf,
    catalog: Option<PathBuf>,
    tuning: PathBuf,
    seed: u64,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("Initializing Underworld Careers (Debug Shell)...");
    let args = parse_args(env::args().collect());

    let catalog = match args.catalog.as_ref() {
        Some(path) => match load_career_catalog(path) {
            Ok(catalog) => catalog,
            Err(err) => {
                eprintln!("Failed to load catalog: {}", err);
                std::process::exit(1);
            }
        },
        None => default_career_catalog(),
    };
    let tuning = match load_tuning(&args.tuning) {
        Ok(tuning) => tuning,
        Err(err) => {
            eprintln!("Failed to load tuning: {}", err);
            CareerTuning::default()
        }
    };
    print_stats(&catalog);

    if let Some(parent) = args.world.parent() {
        if let Err(err) = std::fs::create_dir_all(parent) {
            eprintln!("Failed to create {}: {}", parent.display(), err);
        }
    }
    let mut world_db = match WorldDb::open(&args.world) {
        Ok(db) => Some(db),
        Err(err) => {
            eprintln!("Failed to open world DB: {}", err);
            None
        }
    };

    let mut engine = CareerEngine::new(catalog, tuning, args.seed);
    if let Some(db) = world_db.as_ref() {
        match engine.load_from(db) {
            Ok(count) => println!("Loaded {} characters from {}", count, args.world.display()),
            Err(err) => eprintln!("Failed to load characters: {}", err),
        }
    }
    let mut current: Option<CharacterId> = engine.characters().first().map(|c| c.id);
    let mut attempt: Option<AttemptId> = None;

    println!("{}", COMMANDS);
    loop {
        print!("> ");
        if io::stdout().flush().is_err() {
            break;
        }

        let mut input = String::new();
        match io::stdin().read_line(&mut input) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let trimmed = input.trim();
        if trimmed.is_empty() {
            continue;
        }

        let mut parts = trimmed.split_whitespace();
        let cmd = parts.next().unwrap_or("").to_lowercase();

        match cmd.as_str() {
            "quit" | "exit" => break,
            "help" => println!("{}", COMMANDS),
            "new" => {
                let Some(name) = parts.next() else {
                    println!("Usage: new <name> [level=n] [charisma=n] [skill=v..]");
                    continue;
                };
                let profile = parse_profile(parts);
                let id = engine.create_character(name, profile);
                current = Some(id);
                println!("Created {} {}", id, name);
            }
            "chars" => {
                for record in engine.characters() {
                    let marker = if Some(record.id) == current { "*" } else { " " };
                    println!(
                        "{} {} {} [{:?}] job={}",
                        marker,
                        record.id,
                        record.name,
                        record.lifecycle,
                        record
                            .employment
                            .current_job_id()
                            .map(|id| id.to_string())
                            .unwrap_or_else(|| "-".to_string())
                    );
                }
            }
            "use" => match parts.next().and_then(|raw| raw.parse::<u32>().ok()) {
                Some(raw) => {
                    let id = CharacterId(raw);
                    match engine.character(id) {
                        Ok(record) => {
                            current = Some(id);
                            attempt = engine.open_attempt(id);
                            println!("Now playing {} {}", id, record.name);
                        }
                        Err(err) => println!("{}", err),
                    }
                }
                None => println!("Usage: use <id>"),
            },
            "jobs" => match engine.job_tiers() {
                Ok(tiers) => {
                    for tier in tiers {
                        let skills: Vec<String> = tier
                            .required_skills
                            .iter()
                            .map(|(name, min)| format!("{}>={}", name, min))
                            .collect();
                        println!(
                            "{:<18} {:<11} lvl {:>2} salary {:>9.0} energy {:>2} {}",
                            tier.id.as_str(),
                            tier.title,
                            tier.required_level,
                            tier.annual_salary,
                            tier.energy_cost_per_work,
                            skills.join(" ")
                        );
                    }
                }
                Err(err) => println!("{}", err),
            },
            "apply" => {
                let Some(character) = require_character(current) else {
                    continue;
                };
                let Some(tier) = parts.next() else {
                    println!("Usage: apply <tier> [skill=v..]");
                    continue;
                };
                let declared: DeclaredSkills = parts.filter_map(parse_pair).collect();
                match engine.apply(character, &JobTierId::new(tier), declared) {
                    Ok(submitted) => {
                        println!(
                            "Applied ({}), suspicion {}",
                            submitted.id, submitted.suspicion_level
                        );
                        if submitted.cv_reviewed {
                            attempt = Some(submitted.id);
                            if let Some(question) = submitted.interview.current_question() {
                                println!("Interviewer: {}", question.prompt());
                            }
                        } else {
                            attempt = None;
                            println!("Nobody read your CV. Rejected.");
                        }
                    }
                    Err(err) => println!("{}", err),
                }
            }
            "answer" => {
                let Some(attempt_id) = attempt else {
                    println!("No interview in progress");
                    continue;
                };
                let strategy = match parts.next().map(|s| s.parse::<AnswerStrategy>()) {
                    Some(Ok(strategy)) => strategy,
                    Some(Err(err)) => {
                        println!("{}", err);
                        continue;
                    }
                    None => {
                        println!("Usage: answer <honest|confident|charm>");
                        continue;
                    }
                };
                match engine.answer_interview_question(attempt_id, strategy) {
                    Ok(round) => {
                        println!(
                            "{} ({}%): {} +{}",
                            round.strategy,
                            round.chance,
                            if round.success { "landed" } else { "fell flat" },
                            round.points_awarded
                        );
                        if round.round_complete {
                            println!("Interview over. Use finalize.");
                        } else if let Some(question) = engine
                            .attempt(attempt_id)
                            .and_then(|a| a.interview.current_question())
                        {
                            println!("Interviewer: {}", question.prompt());
                        }
                    }
                    Err(err) => println!("{}", err),
                }
            }
            "finalize" => {
                let Some(attempt_id) = attempt else {
                    println!("No interview in progress");
                    continue;
                };
                match engine.finalize_hiring(attempt_id) {
                    Ok(result) => {
                        attempt = None;
                        println!(
                            "Score {} ({}): {:?}",
                            result.score, result.grade, result.outcome
                        );
                        if let Some(job) = result.job_id.as_ref() {
                            println!("Hired as {}", job);
                        }
                        if result.senior_offer {
                            println!("They were impressed. Senior offer.");
                        }
                        if let Some(terms) = result.probation {
                            println!(
                                "Probation: {} days at {}% performance",
                                terms.days, terms.performance_required
                            );
                        }
                    }
                    Err(err) => println!("{}", err),
                }
            }
            "work" => {
                let Some(character) = require_character(current) else {
                    continue;
                };
                match engine.work_shift(character) {
                    Ok(report) => println!(
                        "Earned {:.2}, +{} xp, performance {:+}{}",
                        report.payout,
                        report.experience_gained,
                        report.performance_delta,
                        if report.project_completed {
                            ", project completed"
                        } else {
                            ""
                        }
                    ),
                    Err(err) => println!("{}", err),
                }
            }
            "social" => {
                let Some(character) = require_character(current) else {
                    continue;
                };
                match engine.socialize(character) {
                    Ok(report) => println!(
                        "{} ({}%): approval {:+}, performance {:+}",
                        if report.success {
                            "Good chat"
                        } else {
                            "Awkward silence"
                        },
                        report.chance,
                        report.approval_delta,
                        report.performance_delta
                    ),
                    Err(err) => println!("{}", err),
                }
            }
            "promote" => {
                let Some(character) = require_character(current) else {
                    continue;
                };
                match engine.request_promotion(character) {
                    Ok(result) if result.promoted => {
                        if let Some(tier) = result.new_tier_id {
                            println!("Promoted to {}", tier);
                        }
                    }
                    Ok(result) => {
                        let unmet: Vec<String> =
                            result.unmet.iter().map(|r| r.to_string()).collect();
                        println!("Not yet: {}", unmet.join(", "));
                    }
                    Err(err) => println!("{}", err),
                }
            }
            "resign" => {
                let Some(character) = require_character(current) else {
                    continue;
                };
                match engine.resign(character) {
                    Ok(()) => println!("You are unemployed."),
                    Err(err) => println!("{}", err),
                }
            }
            "day" => {
                let days = parts
                    .next()
                    .and_then(|raw| raw.parse::<u32>().ok())
                    .unwrap_or(1);
                for _ in 0..days {
                    for event in engine.advance_day() {
                        println!("{}", event);
                    }
                }
                println!("{}", engine.time());
            }
            "status" => {
                let Some(character) = require_character(current) else {
                    continue;
                };
                println!("{}", engine.time());
                match engine.career_summary(character) {
                    Ok(summary) => print!("{}", summary),
                    Err(err) => println!("{}", err),
                }
            }
            "save" => {
                let path = parts.next().unwrap_or("./career_save.json");
                match engine.save_to_path(path) {
                    Ok(()) => println!("Saved to {}", path),
                    Err(err) => println!("Save failed: {}", err),
                }
            }
            "load" => {
                let path = parts.next().unwrap_or("./career_save.json");
                match engine.load_from_path(path) {
                    Ok(()) => {
                        attempt = None;
                        current = engine.characters().first().map(|c| c.id);
                        println!("Loaded {}", path);
                    }
                    Err(err) => println!("Load failed: {}", err),
                }
            }
            _ => println!("Unknown command. {}", COMMANDS),
        }
    }

    if let Some(db) = world_db.as_mut() {
        match engine.persist_to(db) {
            Ok(count) => println!("Saved {} characters to {}", count, args.world.display()),
            Err(err) => eprintln!("Failed to save characters: {}", err),
        }
    }
}

fn parse_args(args: Vec<String>) -> Args {
    let mut iter = args.iter();
    let mut parsed = Args {
        world: PathBuf::from("./assets/db/world.db"),
        catalog: None,
        tuning: PathBuf::from("./assets/data/tuning.json"),
        seed: 1,
    };
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--world" => {
                if let Some(value) = iter.next() {
                    parsed.world = PathBuf::from(value);
                }
            }
            "--catalog" => {
                if let Some(value) = iter.next() {
                    parsed.catalog = Some(PathBuf::from(value));
                }
            }
            "--tuning" => {
                if let Some(value) = iter.next() {
                    parsed.tuning = PathBuf::from(value);
                }
            }
            "--seed" => {
                if let Some(value) = iter.next().and_then(|v| v.parse().ok()) {
                    parsed.seed = value;
                }
            }
            _ => {}
        }
    }
    parsed
}

fn parse_pair(raw: &str) -> Option<(String, u32)> {
    let (key, value) = raw.split_once('=')?;
    Some((key.to_lowercase(), value.parse().ok()?))
}

fn parse_profile<'a>(parts: impl Iterator<Item = &'a str>) -> CharacterProfile {
    let mut profile = CharacterProfile::default();
    for (key, value) in parts.filter_map(parse_pair) {
        match key.as_str() {
            "level" => profile.level = value.max(1),
            "charisma" => profile.charisma = value.min(100),
            "energy" => {
                profile.max_energy = value.max(1);
                profile.energy = profile.max_energy;
            }
            skill => profile = profile.with_skill(skill, value),
        }
    }
    profile
}

fn require_character(current: Option<CharacterId>) -> Option<CharacterId> {
    if current.is_none() {
        println!("No character. Use: new <name>");
    }
    current
}

fn print_stats(catalog: &JobCatalog) {
    let ladders = catalog.entry_tiers().len();
    println!("Catalog: tiers={}, ladders={}", catalog.len(), ladders);
}
