use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::Utc;
use comfy_table::{CellAlignment, Table};
use tracing::{debug, info};

use memdir_calendar::{ThaiDateStyle, age_text, format_thai};
use memdir_gazetteer::{DoctorReport, GazetteerRegistry};
use memdir_model::{AddressTables, AddressValue, Member};
use memdir_roster::{
    RosterView, SortDirection, full_address, load_roster_csv, load_roster_json, validate_member,
};
use memdir_select::{AddressSelector, FormControl};

use crate::cli::{DoctorArgs, LookupArgs, ReportFormatArg, ResolveArgs, RosterArgs, SortArg};
use memdir_cli::logging::redact_value;
use crate::summary::{
    align_column, apply_table_style, apply_wide_table_style, count_cell, dim_cell, header_cell,
    severity_cell,
};

pub fn run_doctor(data_dir: &Path, args: &DoctorArgs) -> Result<bool> {
    let registry = load_registry(data_dir)?;
    let report = DoctorReport::from_registry(&registry);

    match args.format {
        ReportFormatArg::Json => {
            let json = serde_json::to_string_pretty(&report).context("serialize doctor report")?;
            println!("{json}");
        }
        ReportFormatArg::Table => {
            println!("Gazetteer: {}", data_dir.display());
            println!(
                "Manifest: {}",
                if report.manifest_verified {
                    "verified"
                } else {
                    "absent"
                }
            );
            println!(
                "Counts: {} provinces, {} districts, {} subdistricts",
                report.counts.provinces, report.counts.districts, report.counts.subdistricts
            );
            if report.findings.is_empty() {
                println!("No findings.");
            } else {
                let mut table = Table::new();
                table.set_header(vec![
                    header_cell("Kind"),
                    header_cell("Table"),
                    header_cell("Id"),
                    header_cell("Message"),
                ]);
                apply_wide_table_style(&mut table);
                align_column(&mut table, 2, CellAlignment::Right);
                for finding in &report.findings {
                    table.add_row(vec![
                        finding.kind.clone(),
                        finding.table.clone(),
                        finding.id.to_string(),
                        finding.message.clone(),
                    ]);
                }
                println!("{table}");
            }
        }
    }
    Ok(report.is_healthy())
}

pub fn run_provinces(data_dir: &Path) -> Result<()> {
    let registry = load_registry(data_dir)?;
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Id"),
        header_cell("Province"),
        header_cell("English"),
        header_cell("Districts"),
        header_cell("Subdistricts"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    for province in registry.provinces() {
        let districts = registry.districts_of(province.id);
        let subdistricts: usize = districts
            .iter()
            .map(|d| registry.subdistricts_of(d.id).len())
            .sum();
        table.add_row(vec![
            province.id.to_string(),
            province.name_th.clone(),
            province.name_en.clone(),
            districts.len().to_string(),
            subdistricts.to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_lookup(data_dir: &Path, args: &LookupArgs) -> Result<()> {
    let registry = load_registry(data_dir)?;
    let province = registry
        .province(args.province)
        .with_context(|| format!("province {} not found", args.province))?;

    match args.district {
        Some(district_id) => {
            let district = registry
                .district(district_id)
                .with_context(|| format!("district {district_id} not found"))?;
            if district.province_id != province.id {
                bail!(
                    "district {district_id} does not belong to province {}",
                    province.id
                );
            }
            println!("Subdistricts of {} / {}:", province.name_th, district.name_th);
            let mut table = Table::new();
            table.set_header(vec![
                header_cell("Id"),
                header_cell("Subdistrict"),
                header_cell("English"),
                header_cell("Zip"),
            ]);
            apply_table_style(&mut table);
            align_column(&mut table, 0, CellAlignment::Right);
            for subdistrict in registry.subdistricts_of(district.id) {
                table.add_row(vec![
                    subdistrict.id.to_string(),
                    subdistrict.name_th.clone(),
                    subdistrict.name_en.clone(),
                    subdistrict.zip_code.clone(),
                ]);
            }
            println!("{table}");
        }
        None => {
            println!("Districts of {}:", province.name_th);
            let mut table = Table::new();
            table.set_header(vec![
                header_cell("Id"),
                header_cell("District"),
                header_cell("English"),
                header_cell("Subdistricts"),
            ]);
            apply_table_style(&mut table);
            align_column(&mut table, 0, CellAlignment::Right);
            align_column(&mut table, 3, CellAlignment::Right);
            for district in registry.districts_of(province.id) {
                table.add_row(vec![
                    district.id.to_string(),
                    district.name_th.clone(),
                    district.name_en.clone(),
                    registry.subdistricts_of(district.id).len().to_string(),
                ]);
            }
            println!("{table}");
        }
    }
    Ok(())
}

pub fn run_resolve(data_dir: &Path, args: &ResolveArgs) -> Result<()> {
    let value: AddressValue =
        serde_json::from_str(&args.address).context("parse --address JSON")?;
    let registry = load_registry(data_dir)?;

    // Exercise the write-buffering path: the value lands before any
    // reference table is installed.
    let mut selector = AddressSelector::new();
    selector.write_value(Some(value.clone()));
    selector.install_provinces(registry.provinces().to_vec());
    selector.install_districts(registry.districts().to_vec());
    selector.install_subdistricts(registry.subdistricts().to_vec());

    let (province_id, district_id, subdistrict_id) = selector.selection();
    let accepted = AddressValue {
        province_id,
        district_id,
        subdistrict_id,
        zip_code: None,
    };
    let resolved = registry.resolve(&accepted);
    debug!(?value, ?accepted, "resolved address write");

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Level"),
        header_cell("Requested"),
        header_cell("Accepted"),
        header_cell("Name"),
    ]);
    apply_table_style(&mut table);
    let rows = [
        ("Province", value.province_id, province_id, resolved.province),
        ("District", value.district_id, district_id, resolved.district),
        (
            "Subdistrict",
            value.subdistrict_id,
            subdistrict_id,
            resolved.subdistrict,
        ),
    ];
    for (level, requested, accepted_id, name) in rows {
        table.add_row(vec![
            comfy_table::Cell::new(level),
            id_cell(requested),
            id_cell(accepted_id),
            name.map(comfy_table::Cell::new).unwrap_or_else(|| dim_cell("-")),
        ]);
    }
    println!("{table}");

    match selector.value().and_then(|v| v.zip_code) {
        Some(zip) => println!("Derived zip: {zip}"),
        None => println!("Derived zip: - (selection incomplete)"),
    }
    Ok(())
}

pub struct RosterOutcome {
    pub has_errors: bool,
}

pub fn run_roster(data_dir: &Path, args: &RosterArgs) -> Result<RosterOutcome> {
    let registry = load_registry(data_dir)?;
    let members = load_roster(&args.file)?;
    info!(members = members.len(), file = %args.file.display(), "roster imported");

    let mut view = RosterView::new(members).with_per_page(args.per_page);
    if let Some(term) = &args.search {
        view.set_search(term);
    }
    view.set_province_filter(args.province);
    view.set_sort(match args.sort {
        SortArg::None => SortDirection::None,
        SortArg::Asc => SortDirection::Asc,
        SortArg::Desc => SortDirection::Desc,
    });
    view.set_page(args.page);

    let total = view.visible(&registry).len();
    let total_pages = view.total_pages(&registry);
    let page_members = view.page_members(&registry);
    let today = Utc::now().date_naive();

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Name"),
        header_cell("Birth date"),
        header_cell("Age"),
        header_cell("Status"),
        header_cell("Address"),
    ]);
    apply_wide_table_style(&mut table);
    for member in &page_members {
        let birth = member.birthdate.and_then(|d| d.to_calendar_date());
        let birth_text = birth
            .map(|date| format_thai(date, ThaiDateStyle::FullMonth))
            .unwrap_or_else(|| "-".to_string());
        let status = member
            .alive
            .map(|a| a.as_wire().to_string())
            .unwrap_or_else(|| "-".to_string());
        table.add_row(vec![
            member.display_name(),
            birth_text,
            age_text(birth, today),
            status,
            full_address(member, &registry),
        ]);
    }
    println!("{table}");
    println!(
        "Page {} of {} ({} matching member{})",
        view.page(),
        total_pages.max(1),
        total,
        if total == 1 { "" } else { "s" }
    );

    let mut has_errors = false;
    if args.validate {
        has_errors = print_validation(&page_members);
    }
    Ok(RosterOutcome { has_errors })
}

fn print_validation(members: &[&Member]) -> bool {
    let reports: Vec<_> = members.iter().map(|m| validate_member(m)).collect();
    let issue_count: usize = reports.iter().map(|r| r.issues.len()).sum();
    if issue_count == 0 {
        println!("Validation: no issues on this page.");
        return false;
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Member"),
        header_cell("Severity"),
        header_cell("Field"),
        header_cell("Message"),
        header_cell("Errors"),
        header_cell("Warnings"),
    ]);
    apply_wide_table_style(&mut table);
    align_column(&mut table, 4, CellAlignment::Right);
    align_column(&mut table, 5, CellAlignment::Right);
    let mut has_errors = false;
    for report in &reports {
        has_errors |= report.has_errors();
        for issue in &report.issues {
            table.add_row(vec![
                comfy_table::Cell::new(redact_value(&report.member)),
                severity_cell(issue.severity),
                comfy_table::Cell::new(issue.field.clone()),
                comfy_table::Cell::new(issue.message.clone()),
                count_cell(report.error_count(), comfy_table::Color::Red),
                count_cell(report.warning_count(), comfy_table::Color::Yellow),
            ]);
        }
    }
    println!();
    println!("Issues:");
    println!("{table}");
    has_errors
}

fn load_registry(data_dir: &Path) -> Result<GazetteerRegistry> {
    GazetteerRegistry::load(data_dir)
        .with_context(|| format!("load gazetteer from {}", data_dir.display()))
}

fn load_roster(path: &Path) -> Result<Vec<Member>> {
    let is_csv = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    let members = if is_csv {
        load_roster_csv(path)?
    } else {
        load_roster_json(path)?
    };
    Ok(members)
}

fn id_cell(id: Option<i64>) -> comfy_table::Cell {
    match id {
        Some(id) => comfy_table::Cell::new(id),
        None => dim_cell("-"),
    }
}
