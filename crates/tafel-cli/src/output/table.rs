use tafel_core::model::RunStatus;
use tafel_core::plan::PlannedPage;

pub fn print_status(status: &RunStatus) {
    println!("{status}");
    if let RunStatus::Saved { sheets, .. } = status {
        for name in sheets {
            println!("  {name}");
        }
    }
}

pub fn print_plan(planned: &[PlannedPage]) {
    println!("{}", format_plan(planned));
}

pub fn format_plan(planned: &[PlannedPage]) -> String {
    let width = planned
        .iter()
        .map(|p| p.page.len())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut out = format!(
        "  {:<width$}  {:<20}  {}\n",
        "Page", "Region (l,t,r,b)", "Row tolerance"
    );
    out.push_str(&format!("  {}\n", "-".repeat(width + 37)));
    for p in planned {
        out.push_str(&format!(
            "  {:<width$}  {:<20}  {}\n",
            p.page,
            p.config.region.to_string(),
            p.config.row_tolerance
        ));
    }
    out.pop();
    out
}
