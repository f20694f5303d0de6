use terminal_size::{terminal_size, Width};
use crate::enums::analysis_status::AnalysisStatus;
use crate::structs::analysis::analysis_detail::AnalysisDetail;
use crate::structs::analysis::analysis_summary::AnalysisSummary;
use crate::structs::notification::inbox::Inbox;
use crate::structs::report::threat::Threat;
use crate::structs::report::threat_report::ThreatReport;

const DEFAULT_WIDTH: usize = 80;
const MAX_WIDTH: usize = 120;
const RESET: &str = "\x1b[0m";

pub struct ReportLogger {}

impl ReportLogger {

    pub fn print_report(report: &ThreatReport) {
        let rule = Self::rule();
        println!("\n🛡️  THREAT MODEL REPORT");
        println!("{}", rule);
        println!(
            "{} {} ({:.1}/10): {}",
            report.risk_level.emoji(),
            report.risk_level.label(),
            report.risk_score,
            report.risk_level.description()
        );
        print!("🤖 Model: {}", report.model_used);
        if let Some(seconds) = report.processing_time {
            print!("   ⏱️  {:.1}s", seconds);
        }
        println!();

        println!("\n🧩 COMPONENTS ({}):", report.component_count);
        for component in &report.components {
            println!("  • {} [{}]", component.name, component.component_type);
        }

        if !report.connections.is_empty() {
            println!("\n🔗 CONNECTIONS ({}):", report.connections.len());
            for connection in &report.connections {
                let from = report.component_name(&connection.from).unwrap_or(&connection.from);
                let to = report.component_name(&connection.to).unwrap_or(&connection.to);
                let lock = match connection.encrypted {
                    Some(true) => " 🔒",
                    Some(false) => " 🔓",
                    None => "",
                };
                match &connection.protocol {
                    Some(protocol) => println!("  {} → {} ({}){}", from, to, protocol, lock),
                    None => println!("  {} → {}{}", from, to, lock),
                }
            }
        }

        println!("\n📊 STRIDE BREAKDOWN:");
        for (category, count) in report.threats_by_category() {
            println!("  {:<24} {}", category, count);
        }

        println!("\n⚠️  THREATS ({} total):", report.threat_count);
        let width = Self::width();
        for threat in report.ranked_threats() {
            Self::print_threat(report, threat, width);
        }
        println!("{}", rule);
    }

    fn print_threat(report: &ThreatReport, threat: &Threat, width: usize) {
        let component = report.component_name(&threat.component_id).unwrap_or(&threat.component_id);
        println!("\n  {} {} on {}", Self::score_cell(threat), threat.threat_type.label(), component);
        println!("      {}", Self::truncate(&threat.description, width.saturating_sub(6)));
        println!("      💡 {}", Self::truncate(&threat.mitigation, width.saturating_sub(9)));
        if let Some(details) = &threat.dread_details {
            println!(
                "      D {:.0}  R {:.0}  E {:.0}  A {:.0}  D {:.0}",
                details.damage,
                details.reproducibility,
                details.exploitability,
                details.affected_users,
                details.discoverability
            );
        }
    }

    pub fn print_detail(detail: &AnalysisDetail) {
        println!("\n{} {} ({})", detail.status.emoji(), detail.code, detail.status);
        println!("   🆔 {}", detail.id);
        println!("   📅 Created:  {}", detail.created_at.format("%Y-%m-%d %H:%M:%S"));
        if let Some(started) = detail.started_at {
            println!("   ▶️  Started:  {}", started.format("%Y-%m-%d %H:%M:%S"));
        }
        if let Some(finished) = detail.finished_at {
            println!("   🏁 Finished: {}", finished.format("%Y-%m-%d %H:%M:%S"));
        }
        if let Some(logs) = &detail.processing_logs {
            println!("   📜 {}", logs);
        }

        match detail.status {
            AnalysisStatus::Analyzed => {
                if let Some(report) = &detail.result {
                    Self::print_report(report);
                }
            }
            AnalysisStatus::Failed => println!("   ❌ {}", detail.failure_message()),
            AnalysisStatus::Created | AnalysisStatus::Processing => {
                println!("   ⏳ Still running. Use --wait to follow it.");
            }
        }
    }

    pub fn print_summaries(summaries: &[AnalysisSummary]) {
        if summaries.is_empty() {
            println!("📭 No analyses found.");
            return;
        }

        println!("{:<14} {:<12} {:<18} {:<10} {}", "CODE", "STATUS", "CREATED", "RISK", "THREATS");
        println!("{}", Self::rule());
        for summary in summaries {
            let risk = summary.risk_level.map(|level| level.to_string()).unwrap_or_else(|| "-".to_string());
            let threats = summary.threat_count.map(|count| count.to_string()).unwrap_or_else(|| "-".to_string());
            println!(
                "{:<14} {:<12} {:<18} {:<10} {}",
                summary.code,
                summary.status.as_str(),
                summary.created_at.format("%Y-%m-%d %H:%M"),
                risk,
                threats
            );
        }
        println!("\n📊 Total: {}", summaries.len());
    }

    pub fn print_inbox(inbox: &Inbox) {
        if inbox.is_empty() {
            println!("📭 No unread notifications.");
            return;
        }

        println!("🔔 {} unread", inbox.unread_count);
        let width = Self::width();
        for notification in &inbox.notifications {
            let marker = if notification.is_read { "  " } else { "● " };
            println!(
                "{}{}  {}",
                marker,
                notification.created_at.format("%Y-%m-%d %H:%M"),
                notification.title
            );
            println!("    {}", Self::truncate(&notification.message, width.saturating_sub(4)));
            println!("    🆔 {}  🔗 {}", notification.id, notification.link);
        }
    }

    fn score_cell(threat: &Threat) -> String {
        match (threat.effective_score(), threat.band()) {
            (Some(score), Some(band)) => format!("{}[{:>4.1}]{}", band.color(), score, RESET),
            _ => "[ -- ]".to_string(),
        }
    }

    fn truncate(text: &str, max_chars: usize) -> String {
        if text.chars().count() <= max_chars || max_chars < 2 {
            return text.to_string();
        }
        let kept: String = text.chars().take(max_chars - 1).collect();
        format!("{}…", kept)
    }

    fn width() -> usize {
        terminal_size()
            .map(|(Width(w), _)| usize::from(w))
            .unwrap_or(DEFAULT_WIDTH)
            .min(MAX_WIDTH)
    }

    fn rule() -> String {
        "━".repeat(Self::width().min(60))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::stride_category::StrideCategory;

    fn threat(dread_score: Option<f64>) -> Threat {
        Threat {
            component_id: "c1".to_string(),
            threat_type: StrideCategory::from_label("Tampering"),
            description: "Requests can be modified in transit".to_string(),
            mitigation: "Use TLS".to_string(),
            dread_score,
            dread_details: None,
        }
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(ReportLogger::truncate("short", 10), "short");
        assert_eq!(ReportLogger::truncate("ameaça crítica", 7), "ameaça…");
        assert_eq!(ReportLogger::truncate("abc", 1), "abc");
    }

    #[test]
    fn test_score_cell_uses_band_color() {
        let cell = ReportLogger::score_cell(&threat(Some(8.5)));
        assert!(cell.starts_with("\x1b[31m"));
        assert!(cell.contains("8.5"));
        assert_eq!(ReportLogger::score_cell(&threat(None)), "[ -- ]");
    }
}
