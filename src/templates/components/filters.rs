use crate::report::{DistrictDirectory, FilterField, FilterState, Purpose, ReportSpec};
use maud::{html, Markup};

fn required_mark(spec: &ReportSpec, field: FilterField) -> Markup {
    html! {
        @if spec.required(Purpose::View).contains(&field) {
            span style="color: #dc2626;" title="required" { " *" }
        }
    }
}

pub fn filter_form(spec: &ReportSpec, filters: &FilterState, districts: &DistrictDirectory) -> Markup {
    let district = filters.district.as_deref().unwrap_or("");

    html! {
        form class="filters" method="get" action=(spec.href()) {
            @if spec.has_input(FilterField::District) {
                label {
                    "District" (required_mark(spec, FilterField::District))
                    br;
                    @if districts.needs_text_input() {
                        // Lookup failed or came back empty.
                        input type="text" name="district" value=(district) placeholder="Type a district";
                        @if let Some(err) = districts.error() {
                            br;
                            small class="hint" { "District list unavailable: " (err) }
                        }
                    } @else {
                        select name="district" {
                            option value="" selected[district.is_empty()] { "All districts" }
                            @for (division, names) in districts.by_division() {
                                @if division.is_empty() {
                                    @for name in names {
                                        option value=(name) selected[name == district] { (name) }
                                    }
                                } @else {
                                    optgroup label=(division) {
                                        @for name in names {
                                            option value=(name) selected[name == district] { (name) }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
            @if spec.has_input(FilterField::DateRange) {
                label {
                    "From" (required_mark(spec, FilterField::DateRange))
                    br;
                    input type="date" name="start_date" value=(filters.start_date.as_deref().unwrap_or(""));
                }
                label {
                    "To" (required_mark(spec, FilterField::DateRange))
                    br;
                    input type="date" name="end_date" value=(filters.end_date.as_deref().unwrap_or(""));
                }
            }
            input type="hidden" name="offset" value="0";
            button type="submit" name="apply" value="1" { "Apply" }
            a href=(spec.href()) { "Clear" }
        }
    }
}
