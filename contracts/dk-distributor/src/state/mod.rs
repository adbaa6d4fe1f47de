mod boxes;
mod campaigns;
mod cards;
mod config;
mod open_requests;

pub use boxes::{boxes_of, mint_boxes, BoxStatus, CardBox, BOXES};
pub use campaigns::{Campaign, CAMPAIGNS};
pub use cards::{cards_of, issue_card, Card, CARDS};
pub use config::{Config, CONFIG};
pub use open_requests::{create_open_request, take_open_request, OpenRequest, OPEN_REQUESTS};

/// Top level storage key. Values must not conflict.
/// Each key is only one byte long to ensure we use the smallest possible storage keys.
#[repr(u8)]
pub enum TopKey {
    Config = b'c',
    Campaigns = b'C',
    Boxes = b'b',
    BoxesByOwner = b'B',
    BoxesLastId = b'L',
    Cards = b'd',
    CardsByOwner = b'D',
    CardsLastId = b'M',
    OpenRequests = b'o',
    OpenRequestsLastId = b'O',
}

impl TopKey {
    const fn as_str(&self) -> &str {
        let array_ref = unsafe { std::mem::transmute::<_, &[u8; 1]>(self) };
        match core::str::from_utf8(array_ref) {
            Ok(a) => a,
            Err(_) => panic!("Non-utf8 enum value found. Use a-z, A-Z and 0-9"),
        }
    }
}
