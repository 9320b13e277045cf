use crate::{
    available_zones, AgeGroup, Advisory, ChronoTzDatabase, FlightClass, OllamaClient,
    SchedulePlan, ScheduleGenerator, TripForm, TripParameters,
};
use anyhow::Context;
use clap::{Arg, ArgAction, ArgMatches, Command};
use serde::Serialize;
use std::process::ExitCode;
use std::time::Duration;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Serialize)]
struct Report<'a> {
    trip: &'a TripParameters,
    effective_days: u32,
    advisory: &'a Advisory,
    #[serde(skip_serializing_if = "Option::is_none")]
    plan: Option<&'a SchedulePlan>,
    #[serde(skip_serializing_if = "Option::is_none")]
    plan_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<serde_json::Value>,
}

fn command() -> Command {
    Command::new("lagless")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Jet lag help: time shift, quick tips and a local-AI recovery plan")
        .arg(
            Arg::new("from")
                .short('f')
                .long("from")
                .value_name("ZONE")
                .help("Timezone you live in, e.g. Asia/Bangkok"),
        )
        .arg(
            Arg::new("to")
                .short('t')
                .long("to")
                .value_name("ZONE")
                .help("Destination timezone, e.g. Europe/London"),
        )
        .arg(
            Arg::new("age")
                .short('a')
                .long("age")
                .value_name("GROUP")
                .help("Age group: kid, teen or adult"),
        )
        .arg(
            Arg::new("days")
                .short('d')
                .long("days")
                .value_name("DAYS")
                .value_parser(clap::value_parser!(u32))
                .help("Trip length in days (plans cover at most 3)"),
        )
        .arg(
            Arg::new("class")
                .short('c')
                .long("class")
                .value_name("CLASS")
                .help("Flight class: economy, premium, business or first"),
        )
        .arg(
            Arg::new("admin-code")
                .long("admin-code")
                .value_name("CODE")
                .num_args(0..=1)
                .default_missing_value("")
                .help("Submit an admin code"),
        )
        .arg(
            Arg::new("plan")
                .short('p')
                .long("plan")
                .action(ArgAction::SetTrue)
                .help("Generate a day-by-day recovery plan with the local model"),
        )
        .arg(
            Arg::new("combined")
                .long("combined")
                .action(ArgAction::SetTrue)
                .conflicts_with("plan")
                .help("Generate the whole plan in a single model request"),
        )
        .arg(
            Arg::new("model")
                .short('m')
                .long("model")
                .value_name("MODEL")
                .help("Ollama model to use (or set LAGLESS_MODEL)"),
        )
        .arg(
            Arg::new("base-url")
                .short('u')
                .long("base-url")
                .value_name("URL")
                .help("Ollama base URL (or set LAGLESS_OLLAMA_URL / OLLAMA_HOST)"),
        )
        .arg(
            Arg::new("timeout")
                .long("timeout")
                .value_name("SECONDS")
                .value_parser(clap::value_parser!(u64))
                .help("Per-request timeout in seconds (or set LAGLESS_TIMEOUT_SECS)"),
        )
        .arg(
            Arg::new("list-zones")
                .long("list-zones")
                .action(ArgAction::SetTrue)
                .help("Print every known timezone id and exit"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .action(ArgAction::SetTrue)
                .help("Print the advisory and plan as JSON"),
        )
}

fn build_form(matches: &ArgMatches) -> anyhow::Result<TripForm> {
    let mut form = TripForm::new();

    if let Some(zone) = matches.get_one::<String>("from") {
        form.set_origin(zone.as_str());
    }
    if let Some(zone) = matches.get_one::<String>("to") {
        form.set_destination(zone.as_str());
    }
    if let Some(age) = matches.get_one::<String>("age") {
        form.set_age_group(age.parse::<AgeGroup>()?);
    }
    if let Some(days) = matches.get_one::<u32>("days") {
        form.set_trip_length(*days)?;
    }
    if let Some(code) = matches.get_one::<String>("admin-code") {
        form.submit_admin_code(code);
    }
    if let Some(class) = matches.get_one::<String>("class") {
        form.set_flight_class(class.parse::<FlightClass>()?)?;
    }

    Ok(form)
}

fn build_client(matches: &ArgMatches) -> anyhow::Result<OllamaClient> {
    let mut client = OllamaClient::from_env().context("invalid Ollama configuration")?;

    if let Some(model) = matches.get_one::<String>("model") {
        client = client.with_model(model.as_str());
    }
    if let Some(base_url) = matches.get_one::<String>("base-url") {
        client = client.with_base_url(base_url.as_str());
    }
    if let Some(secs) = matches.get_one::<u64>("timeout") {
        client = client.with_timeout(Duration::from_secs(*secs));
    }

    Ok(client)
}

fn print_advisory(form: &TripForm, advisory: &Advisory) {
    let params = form.params();

    if let Some(greeting) = form.admin_greeting() {
        println!("{}", greeting);
    }
    println!("LagLess ✈️");
    println!("From: {}", params.origin_timezone);
    println!("To:   {}", params.destination_timezone);
    println!(
        "Age group: {} | Flight class: {} | Trip: {} days",
        params.age_group.label(),
        params.flight_class.label(),
        params.trip_length_days
    );
    println!();
    println!("⏰ Time difference: {} hours", advisory.time_difference);
    println!("✈️ Direction: {}", advisory.direction);
    println!("💡 Advice: {}", advisory.immediate_advice);
    println!("🧭 What should I do right now? {}", advisory.right_now_advice);
}

/// CLI entry point for the lagless tool
pub async fn run() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let matches = command().get_matches();
    let zones = ChronoTzDatabase;

    if matches.get_flag("list-zones") {
        for zone in available_zones(&zones) {
            println!("{}", zone);
        }
        return Ok(ExitCode::SUCCESS);
    }

    let form = build_form(&matches)?;
    let params = form.params();
    let known = available_zones(&zones);
    for zone in [&params.origin_timezone, &params.destination_timezone] {
        if !known.contains(zone) {
            warn!(%zone, "unknown timezone, time difference assumes no shift");
        }
    }

    let advisory = form.advisory(&zones, chrono::Utc::now());
    let json = matches.get_flag("json");
    let wants_plan = matches.get_flag("plan");
    let wants_combined = matches.get_flag("combined");

    if !json {
        print_advisory(&form, &advisory);
    }

    if !wants_plan && !wants_combined {
        if json {
            print_report(params, &advisory, None, None, None)?;
        }
        return Ok(ExitCode::SUCCESS);
    }

    let client = build_client(&matches)?;
    info!(model = %client.model(), base_url = %client.base_url(), "using Ollama");
    let generator = ScheduleGenerator::new(client);

    if !json {
        println!();
        println!("Plan focuses on the first 3 days (typical jet lag recovery window).");
        eprintln!("{}", form.trigger_label(true));
    }

    let outcome = if wants_combined {
        generator.generate_combined(params).await
    } else {
        generator.generate(params).await
    };

    if json {
        match &outcome {
            Ok(plan) => print_report(params, &advisory, Some(plan), Some(plan.render()), None)?,
            Err(err) => print_report(params, &advisory, None, None, Some(err.to_error_payload()))?,
        }
    } else {
        println!();
        println!("{}", plan_display(&outcome));
    }

    match outcome {
        Ok(_) => Ok(ExitCode::SUCCESS),
        Err(err) => {
            debug!(error = %err, "recovery plan generation failed");
            Ok(ExitCode::FAILURE)
        }
    }
}

/// The plan text, or the single error line shown in its place.
fn plan_display(outcome: &crate::Result<SchedulePlan>) -> String {
    match outcome {
        Ok(plan) => plan.render(),
        Err(err) => format!("AI error: {}", err),
    }
}

fn print_report(
    trip: &TripParameters,
    advisory: &Advisory,
    plan: Option<&SchedulePlan>,
    plan_text: Option<String>,
    error: Option<serde_json::Value>,
) -> anyhow::Result<()> {
    let report = Report {
        trip,
        effective_days: trip.effective_days(),
        advisory,
        plan,
        plan_text,
        error,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
