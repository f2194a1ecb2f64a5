use chrono::{NaiveDate, NaiveTime};
use garde::Validate;
use kernel::model::{id::SpaceTypeId, space::SpaceListOptions};

/// Catalogue filters as entered by the user.
#[derive(Debug, Default, Validate)]
pub struct SpaceFilterForm {
    #[garde(range(min = 0))]
    pub capacity: Option<i32>,
    #[garde(skip)]
    pub space_type_id: Option<SpaceTypeId>,
    #[garde(skip)]
    pub desired_date: Option<NaiveDate>,
    #[garde(range(min = 1))]
    pub page: Option<u32>,
    #[garde(range(min = 1, max = 100))]
    pub per_page: Option<u32>,
}

impl From<SpaceFilterForm> for SpaceListOptions {
    fn from(value: SpaceFilterForm) -> Self {
        let SpaceFilterForm {
            capacity,
            space_type_id,
            desired_date,
            page,
            per_page,
        } = value;
        SpaceListOptions {
            capacity,
            space_type_id,
            desired_date,
            page,
            per_page,
        }
    }
}

#[derive(Debug, Default, Validate)]
pub struct BookingForm {
    #[garde(length(min = 1, max = 255))]
    pub event_name: Option<String>,
    #[garde(length(max = 1000))]
    pub event_description: Option<String>,
}

/// One entry of the time picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeOption {
    pub time: NaiveTime,
    pub occupied: bool,
}
