use crate::report::{Level, Notice};
use maud::{html, Markup};

pub fn notice(n: &Notice) -> Markup {
    let (class, role) = match n.level {
        Level::Info => ("notice notice-info", "status"),
        Level::Warning => ("notice notice-warning", "alert"),
        Level::Error => ("notice notice-error", "alert"),
    };

    html! {
        div class=(class) role=(role) { (n.text) }
    }
}
