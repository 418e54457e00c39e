use crate::report::{ReportQueryEngine, ReportSpec};
use maud::{html, Markup};
use serde_json::Value;

pub fn report_table(spec: &ReportSpec, rows: &[Value]) -> Markup {
    html! {
        div style="overflow-x: auto;" {
            table {
                thead {
                    tr {
                        @for col in spec.columns {
                            th { (col.label) }
                        }
                    }
                }
                tbody {
                    @if rows.is_empty() {
                        tr {
                            td colspan=(spec.columns.len()) style="color: #6b7280;" { "No records found." }
                        }
                    }
                    @for row in rows {
                        tr {
                            @for col in spec.columns {
                                td { (col.cell(row)) }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// "Showing x–y of n" with previous/next links. Disabled directions render
/// as plain text.
pub fn pager(engine: &ReportQueryEngine) -> Markup {
    let base = engine.spec().href();
    let link = |offset: u64| format!("{}?{}", base, engine.filters().with_offset(offset).link_query());

    html! {
        div class="pager" {
            span class="showing" { (engine.showing_label()) }
            @match engine.prev_offset() {
                Some(offset) => a class="prev" href=(link(offset)) { "‹ Previous" },
                None => span class="prev disabled" { "‹ Previous" },
            }
            @match engine.next_offset() {
                Some(offset) => a class="next" href=(link(offset)) { "Next ›" },
                None => span class="next disabled" { "Next ›" },
            }
        }
    }
}
