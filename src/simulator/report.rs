//! Simulation report generation.

use serde::Serialize;

/// Statistics of a single simulated run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunStats {
    pub seed: u64,
    pub simulated_seconds: f64,
    pub final_evidence: f64,
    pub final_eps: f64,
    pub all_time_evidence: f64,
    pub generators_owned: u64,
    pub upgrades_owned: usize,
    pub purchases: u32,
    pub clicks: u64,
    pub critical_hits: u64,
    pub bursts: u64,
    pub quests_succeeded: u64,
    pub quests_failed: u64,
    pub bonus_targets_claimed: u64,
    pub challenges_claimed: u32,
    pub conspiracies_proven: usize,
    pub achievements: usize,
    /// Share of the catalog's achievements unlocked, in percent.
    pub achievement_percentage: f64,
    pub ascensions: u32,
    pub tokens_earned: u64,
    /// Game time of the first ascension, if any.
    pub first_ascension_at: Option<f64>,
}

impl RunStats {
    pub fn quest_success_rate(&self) -> f64 {
        let total = self.quests_succeeded + self.quests_failed;
        if total == 0 {
            return 0.0;
        }
        self.quests_succeeded as f64 / total as f64
    }
}

/// Aggregated results from multiple simulation runs.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub num_runs: u32,
    pub strategy: String,

    pub avg_final_eps: f64,
    pub avg_all_time_evidence: f64,
    pub avg_generators_owned: f64,
    pub avg_purchases: f64,
    pub avg_bursts: f64,
    pub avg_quest_success_rate: f64,
    pub avg_achievements: f64,
    pub avg_achievement_percentage: f64,
    pub avg_ascensions: f64,
    pub runs_ascended: u32,
    pub avg_first_ascension_seconds: Option<f64>,

    // Individual run stats for detailed analysis
    pub run_stats: Vec<RunStats>,
}

fn average(runs: &[RunStats], f: impl Fn(&RunStats) -> f64) -> f64 {
    if runs.is_empty() {
        return 0.0;
    }
    runs.iter().map(f).sum::<f64>() / runs.len() as f64
}

impl SimReport {
    pub fn from_runs(runs: Vec<RunStats>, strategy: &str) -> Self {
        let ascension_times: Vec<f64> = runs.iter().filter_map(|r| r.first_ascension_at).collect();
        let avg_first_ascension_seconds = if ascension_times.is_empty() {
            None
        } else {
            Some(ascension_times.iter().sum::<f64>() / ascension_times.len() as f64)
        };

        Self {
            num_runs: runs.len() as u32,
            strategy: strategy.to_string(),
            avg_final_eps: average(&runs, |r| r.final_eps),
            avg_all_time_evidence: average(&runs, |r| r.all_time_evidence),
            avg_generators_owned: average(&runs, |r| r.generators_owned as f64),
            avg_purchases: average(&runs, |r| r.purchases as f64),
            avg_bursts: average(&runs, |r| r.bursts as f64),
            avg_quest_success_rate: average(&runs, RunStats::quest_success_rate),
            avg_achievements: average(&runs, |r| r.achievements as f64),
            avg_achievement_percentage: average(&runs, |r| r.achievement_percentage),
            avg_ascensions: average(&runs, |r| r.ascensions as f64),
            runs_ascended: ascension_times.len() as u32,
            avg_first_ascension_seconds,
            run_stats: runs,
        }
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    SIMULATION REPORT\n");
        report.push_str(&format!("                 strategy: {}\n", self.strategy));
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!("Runs: {}\n\n", self.num_runs));

        report.push_str("── ECONOMY ──────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Avg Final EPS:        {:.2}\n", self.avg_final_eps));
        report.push_str(&format!(
            "  Avg Lifetime Evidence: {:.0}\n",
            self.avg_all_time_evidence
        ));
        report.push_str(&format!(
            "  Avg Generators:       {:.1}\n",
            self.avg_generators_owned
        ));
        report.push_str(&format!("  Avg Purchases:        {:.1}\n\n", self.avg_purchases));

        report.push_str("── ACTIVITY ─────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Avg Combo Bursts:     {:.1}\n", self.avg_bursts));
        report.push_str(&format!(
            "  Quest Success Rate:   {:.1}%\n",
            self.avg_quest_success_rate * 100.0
        ));
        report.push_str(&format!(
            "  Avg Achievements:     {:.1} ({:.0}%)\n\n",
            self.avg_achievements, self.avg_achievement_percentage
        ));

        report.push_str("── PRESTIGE ─────────────────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Runs Ascended:        {}/{}\n",
            self.runs_ascended, self.num_runs
        ));
        report.push_str(&format!("  Avg Ascensions:       {:.2}\n", self.avg_ascensions));
        match self.avg_first_ascension_seconds {
            Some(seconds) => report.push_str(&format!(
                "  Avg First Ascension:  {}\n",
                format_duration(seconds)
            )),
            None => report.push_str("  Avg First Ascension:  never\n"),
        }

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");
        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

pub fn format_duration(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    let (h, m, s) = (total / 3600, (total % 3600) / 60, total % 60);
    if h > 0 {
        format!("{}h {:02}m {:02}s", h, m, s)
    } else {
        format!("{}m {:02}s", m, s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_generation() {
        let runs = vec![
            RunStats {
                final_eps: 10.0,
                quests_succeeded: 3,
                quests_failed: 1,
                first_ascension_at: Some(600.0),
                achievement_percentage: 50.0,
                ..Default::default()
            },
            RunStats {
                final_eps: 20.0,
                ..Default::default()
            },
        ];

        let report = SimReport::from_runs(runs, "cheapest-first");

        assert_eq!(report.num_runs, 2);
        assert_eq!(report.avg_final_eps, 15.0);
        assert_eq!(report.avg_quest_success_rate, 0.375);
        assert_eq!(report.runs_ascended, 1);
        assert_eq!(report.avg_first_ascension_seconds, Some(600.0));
        assert_eq!(report.avg_achievement_percentage, 25.0);
        assert!(report.to_text().contains("(25%)"));
        assert!(report.to_text().contains("cheapest-first"));
        assert!(report.to_json().contains("\"avg_final_eps\""));
    }

    #[test]
    fn test_empty_report() {
        let report = SimReport::from_runs(Vec::new(), "payback-optimal");
        assert_eq!(report.avg_final_eps, 0.0);
        assert!(report.to_text().contains("never"));
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(59.0), "0m 59s");
        assert_eq!(format_duration(3_725.0), "1h 02m 05s");
    }
}
