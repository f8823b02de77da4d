//! Screen implementations. Each screen is a top-level Component.

pub mod table;
pub mod traffic;

use crate::component::Component;
use crate::screen::ScreenId;

use self::table::TableScreen;
use self::traffic::TrafficScreen;

/// One screen per tab: charts for traffic, a record table for the rest.
pub fn create_screens() -> Vec<(ScreenId, Box<dyn Component>)> {
    ScreenId::ALL
        .iter()
        .map(|&id| {
            let screen: Box<dyn Component> = match id.table() {
                Some(table) => Box::new(TableScreen::new(table)),
                None => Box::new(TrafficScreen::new()),
            };
            (id, screen)
        })
        .collect()
}
