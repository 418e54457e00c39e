use crate::auth::Session;
use crate::dashboard::{shares, ChartPoint, DashboardData, Panel};
use crate::report::{catalog, Notice};
use crate::templates::{card, components::notice, desktop_layout};
use maud::{html, Markup};

pub struct DashboardVm<'a> {
    pub session: &'a Session,
    pub data: DashboardData,
}

pub fn dashboard_page(vm: &DashboardVm) -> Markup {
    let role = vm.session.role;

    desktop_layout(
        "Dashboard",
        Some(vm.session),
        html! {
            main class="container" {
                h1 { (role.label()) " Dashboard" }

                (panel_or_error(&vm.data.cards, |points| html! {
                    div class="cards" {
                        @for p in points {
                            div class="card" {
                                div style="color: #6b7280;" { (p.label) }
                                div class="stat" { (format_value(p.value)) }
                            }
                        }
                    }
                }))

                (card("Gender Participation", panel_or_error(&vm.data.gender, gender_breakdown)))

                (card("Workshops by District", panel_or_error(&vm.data.districts, district_bars)))

                (card("Reports", html! {
                    ul {
                        @for report in catalog::for_role(role) {
                            li { a href=(report.href()) { (report.title) } }
                        }
                    }
                }))
            }
        },
    )
}

fn panel_or_error(panel: &Panel, render: impl Fn(&[ChartPoint]) -> Markup) -> Markup {
    match panel {
        Ok(points) if points.is_empty() => html! { p style="color: #6b7280;" { "No data yet." } },
        Ok(points) => render(points),
        Err(msg) => notice(&Notice::error(msg.clone())),
    }
}

fn gender_breakdown(points: &[ChartPoint]) -> Markup {
    let pct = shares(points);
    html! {
        table {
            @for (p, share) in points.iter().zip(pct) {
                tr {
                    td { (p.label) }
                    td { (format_value(p.value)) }
                    td { (format!("{share:.1}%")) }
                }
            }
        }
    }
}

fn district_bars(points: &[ChartPoint]) -> Markup {
    let max = points.iter().map(|p| p.value).fold(0.0_f64, f64::max);
    html! {
        table {
            @for p in points {
                tr {
                    td style="width: 30%;" { (p.label) }
                    td {
                        @let width = if max > 0.0 { p.value.max(0.0) * 100.0 / max } else { 0.0 };
                        div class="bar" style=(format!("width: {width:.0}%;")) {}
                    }
                    td style="width: 10%; text-align: right;" { (format_value(p.value)) }
                }
            }
        }
    }
}

fn format_value(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{v:.0}")
    } else {
        format!("{v:.2}")
    }
}
