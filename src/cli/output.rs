use colored::Colorize;
use serde::Serialize;

use crate::{
    cli::OutputFormat,
    error::Result,
    fec::{Candidate, DonationRecord, FinancialReport},
    storage::CommitteeRef,
    utils,
};

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

const CANDIDATE_WIDTHS: [usize; 5] = [12, 36, 5, 5, 20];

pub fn candidates(found: &[Candidate], format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(found);
    }

    if found.is_empty() {
        println!("{}", "No candidates found".yellow());
        return Ok(());
    }

    utils::print_table_border(86);
    utils::print_table_row(
        &["Candidate ID", "Name", "State", "Party", "Years"],
        &CANDIDATE_WIDTHS,
    );
    utils::print_table_border(86);
    for c in found {
        let years = c
            .election_years
            .iter()
            .map(|y| y.to_string())
            .collect::<Vec<_>>()
            .join(",");
        utils::print_table_row(
            &[
                &c.candidate_id,
                &utils::truncate(&c.name, 36),
                c.state.as_deref().unwrap_or("-"),
                c.party.as_deref().unwrap_or("-"),
                &utils::truncate(&years, 20),
            ],
            &CANDIDATE_WIDTHS,
        );
    }
    utils::print_table_border(86);
    Ok(())
}

pub fn donations(records: &[DonationRecord], format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(records);
    }

    if records.is_empty() {
        println!("{}", "No donations found for the selected year".yellow());
        return Ok(());
    }

    utils::print_table_border(70);
    utils::print_table_row(&["Contributor", "Amount", "Date"], &[40, 15, 10]);
    utils::print_table_border(70);
    for record in records {
        utils::print_table_row(
            &[
                &utils::truncate(record.contributor_name().unwrap_or("-"), 40),
                &utils::format_currency(record.amount()),
                &utils::format_date(record.receipt_date()),
            ],
            &[40, 15, 10],
        );
    }
    utils::print_table_border(70);
    println!("{} donations", records.len());
    Ok(())
}

/// JSON body of a committees lookup, `null` when the candidate is not stored
fn committees_json(committees: Option<&[CommitteeRef]>) -> Result<String> {
    Ok(serde_json::to_string_pretty(&committees)?)
}

pub fn committees(
    candidate_id: &str,
    committees: Option<&[CommitteeRef]>,
    format: OutputFormat,
) -> Result<()> {
    if format == OutputFormat::Json {
        println!("{}", committees_json(committees)?);
        return Ok(());
    }

    let Some(committees) = committees else {
        println!(
            "{}",
            format!("Candidate {} is not in the stored results", candidate_id).yellow()
        );
        return Ok(());
    };

    utils::print_table_border(60);
    utils::print_table_row(&["Committee ID", "Name"], &[12, 46]);
    utils::print_table_border(60);
    for committee in committees {
        utils::print_table_row(
            &[&committee.committee_id, &utils::truncate(&committee.name, 46)],
            &[12, 46],
        );
    }
    utils::print_table_border(60);
    Ok(())
}

pub fn latest_reports(
    reports: &[(String, Option<FinancialReport>)],
    format: OutputFormat,
) -> Result<()> {
    if format == OutputFormat::Json {
        let as_map: indexmap::IndexMap<&str, &Option<FinancialReport>> =
            reports.iter().map(|(id, r)| (id.as_str(), r)).collect();
        return print_json(&as_map);
    }

    for (committee_id, report) in reports {
        println!("\n{}", format!("=== {} ===", committee_id).cyan().bold());
        let Some(report) = report else {
            println!("{}", "No reports found".yellow());
            continue;
        };

        println!("  Report:         {}", report.report_type_full.as_deref().unwrap_or("-"));
        println!(
            "  Coverage:       {} to {}",
            utils::format_date(report.coverage_start_date.as_deref()),
            utils::format_date(report.coverage_end_date.as_deref())
        );
        println!("  Receipts:       {}", utils::format_currency(report.total_receipts_period));
        println!("  Disbursements:  {}", utils::format_currency(report.total_disbursements_period));
        println!("  Cash on hand:   {}", utils::format_currency(report.cash_on_hand_end_period));
    }
    Ok(())
}
