use crate::infra::DAILY_BOTTLENECKS;
use clap::Args;
use std::path::PathBuf;
use zephyrus_or::analytics::bottleneck::{
    reference, BottleneckRanking, BottleneckReport, BottleneckView, CandidateImporter,
    validate_top_n, FixtureBuilder, RangePolicy, SeededFixtures, SeverityAggregator, ViewState,
};
use zephyrus_or::config::AppConfig;
use zephyrus_or::error::AppError;

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    /// Dashboard view to render (resource-stress, cascade-impact, wait-time, acuity-mix, daily-summary)
    #[arg(long)]
    pub(crate) view: Option<BottleneckView>,
    /// Hour of day (0-23) for the time-adjusted wait score
    #[arg(long)]
    pub(crate) hour: Option<u8>,
    /// Number of bottlenecks to list (defaults to ZEPHYRUS_TOP_N)
    #[arg(long, value_parser = parse_top_n)]
    pub(crate) top: Option<usize>,
    /// CSV export of bottleneck candidates to rank instead of the reference list
    #[arg(long)]
    pub(crate) candidates_csv: Option<PathBuf>,
    /// Out-of-range score handling: reject, clamp, or pass-through
    #[arg(long)]
    pub(crate) range_policy: Option<RangePolicy>,
    /// Use seeded mock metrics instead of the reference department
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// Print the report summary as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct RankArgs {
    /// CSV export with Name, Resource Stress, Cascade, Wait Time, Acuity columns
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Number of bottlenecks to list (defaults to ZEPHYRUS_TOP_N)
    #[arg(long, value_parser = parse_top_n)]
    pub(crate) top: Option<usize>,
    /// Out-of-range score handling: reject, clamp, or pass-through
    #[arg(long)]
    pub(crate) range_policy: Option<RangePolicy>,
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Seed for the mock data generator
    #[arg(long, default_value_t = 7)]
    pub(crate) seed: u64,
    /// Weeks of utilization trend to print
    #[arg(long, default_value_t = 12)]
    pub(crate) weeks: u32,
}

fn parse_top_n(raw: &str) -> Result<usize, String> {
    let value = raw
        .trim()
        .parse::<usize>()
        .map_err(|err| format!("'{raw}' is not a count: {err}"))?;
    validate_top_n(value).map_err(|err| err.to_string())
}

pub(crate) fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let scoring = AppConfig::load()?.scoring;
    let state = ViewState {
        active_view: args.view.unwrap_or_default(),
        top_n: args.top.unwrap_or(scoring.top_n),
        hour: args.hour,
        range_policy: args.range_policy.unwrap_or(scoring.range_policy),
    };

    let (metrics, mut candidates) = match args.seed {
        Some(seed) => {
            let mut fixtures = SeededFixtures::new(seed);
            let candidates = fixtures.candidates(&DAILY_BOTTLENECKS);
            (fixtures.metric_snapshot(), candidates)
        }
        None => (reference::metric_snapshot(), reference::daily_candidates()),
    };
    if let Some(path) = args.candidates_csv {
        candidates = CandidateImporter::from_path(path)?;
    }

    let report = BottleneckReport::build(metrics, &candidates, state.report_options())?;
    if args.json {
        match serde_json::to_string_pretty(&report.summary()) {
            Ok(json) => println!("{json}"),
            Err(err) => println!("Report summary unavailable: {err}"),
        }
        return Ok(());
    }

    render_view(&report, &state);
    Ok(())
}

pub(crate) fn run_rank(args: RankArgs) -> Result<(), AppError> {
    let scoring = AppConfig::load()?.scoring;
    let candidates = CandidateImporter::from_path(&args.csv)?;
    let policy = args.range_policy.unwrap_or(scoring.range_policy);
    let ranking =
        SeverityAggregator::new(policy).rank(&candidates, Some(args.top.unwrap_or(scoring.top_n)));

    println!(
        "Ranked {} of {} candidates from {} (range policy: {})",
        ranking.ranked.len(),
        candidates.len(),
        args.csv.display(),
        policy
    );
    render_ranking(&ranking);
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { seed, weeks } = args;
    let mut fixtures = SeededFixtures::new(seed);

    println!("Bottleneck analytics demo (seed {seed})");
    println!("\nUtilization trend ({weeks} weeks)");
    for point in fixtures.utilization_trend(weeks) {
        println!(
            "  {:<8} staff {:>3.0}% | equipment {:>3.0}% | space {:>3.0}%",
            point.week,
            point.staffing * 100.0,
            point.equipment * 100.0,
            point.space * 100.0
        );
    }

    let candidates = fixtures.candidates(&DAILY_BOTTLENECKS);
    let metrics = fixtures.metric_snapshot();

    for view in BottleneckView::ordered() {
        let state = ViewState {
            active_view: view,
            hour: Some(15),
            ..ViewState::default()
        };
        let report = BottleneckReport::build(metrics.clone(), &candidates, state.report_options())?;
        println!();
        render_view(&report, &state);
    }

    Ok(())
}

pub(crate) fn render_view(report: &BottleneckReport, state: &ViewState) {
    println!("{}", state.active_view.label());
    match state.active_view {
        BottleneckView::ResourceStress => render_resource_stress(report),
        BottleneckView::CascadeImpact => render_cascade(report),
        BottleneckView::WaitTime => render_wait_time(report),
        BottleneckView::AcuityMix => render_acuity(report),
        BottleneckView::DailySummary => render_daily_summary(report),
    }
}

fn render_resource_stress(report: &BottleneckReport) {
    let score = &report.breakdown.resource_stress;
    println!("- Resource stress score: {}/20", score.total);
    for component in &score.components {
        println!(
            "  - {}: {:.0}% average, {} band (x{:.1}) -> {}",
            component.category_label,
            component.average_utilization * 100.0,
            component.band.label(),
            component.factor,
            component.component_score
        );
    }
    println!("Resource utilization:");
    for row in report.utilization_rows() {
        println!(
            "  - {} ({}): {}% (high {}%, critical {}%)",
            row.resource,
            row.category_label,
            row.utilization_pct,
            row.high_threshold_pct,
            row.critical_threshold_pct
        );
    }
    if let Some(peak) = report
        .hourly_stress()
        .into_iter()
        .max_by_key(|hour| hour.stress_score)
    {
        println!("Peak hourly stress: {} at {}", peak.stress_score, peak.label);
    }
}

fn render_cascade(report: &BottleneckReport) {
    let score = &report.breakdown.cascade;
    println!(
        "- Cascade impact score: {}/20 from {}",
        score.total, score.primary_process
    );
    for process in &score.process_scores {
        println!(
            "  - {}: severity {} | volume {} | resources {} | time {} (avg {:.2})",
            process.name,
            process.severity_score,
            process.volume_score,
            process.resource_score,
            process.time_score,
            process.average
        );
    }
    println!("Process types:");
    for share in report.process_types() {
        println!("  - {}: {} ({:.0}%)", share.label, share.count, share.percentage);
    }
}

fn render_wait_time(report: &BottleneckReport) {
    let score = &report.breakdown.wait_time;
    println!(
        "- Wait time score: {}/25 (average deviation {:.0}%)",
        score.base_score,
        score.avg_deviation * 100.0
    );
    if let (Some(adjusted), Some(hour)) = (report.adjusted_wait_score, report.options.hour) {
        println!("  Adjusted for {hour:02}:00: {adjusted}");
    }
    for step in report.step_comparisons() {
        println!(
            "  - {}: {:.0} min vs {:.0} min benchmark ({:+}%)",
            step.step, step.current_minutes, step.benchmark_minutes, step.deviation_pct
        );
    }
    if score.critical_deviations.is_empty() {
        println!("Critical deviations: none");
    } else {
        println!("Critical deviations:");
        for deviation in &score.critical_deviations {
            println!("  - {}: {}% over benchmark", deviation.step, deviation.deviation_pct);
        }
    }
}

fn render_acuity(report: &BottleneckReport) {
    let score = &report.breakdown.acuity;
    println!(
        "- Acuity mix score: {}/15 (weighted {:.3})",
        score.score, score.weighted_score
    );
    for row in report.acuity_distribution() {
        println!(
            "  - {}: {}% actual vs {}% expected (weight {:.1})",
            row.label, row.actual_pct, row.expected_pct, row.weight
        );
    }
}

fn render_daily_summary(report: &BottleneckReport) {
    let summary = report.summary();
    for entry in &summary.dimensions {
        println!(
            "- {}: {}/{} (weight {}%)",
            entry.label, entry.score, entry.max_score, entry.weight_pct
        );
    }
    render_ranking(&report.ranking);
}

fn render_ranking(ranking: &BottleneckRanking) {
    println!("Top bottlenecks:");
    for (idx, result) in ranking.ranked.iter().enumerate() {
        println!("  {}. {} (severity {})", idx + 1, result.name, result.severity);
    }
    for rejected in &ranking.rejected {
        println!("  skipped {}: {}", rejected.name, rejected.reason);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_renders_every_view() {
        run_demo(DemoArgs { seed: 3, weeks: 4 }).expect("demo runs");
    }
}
