mod entities;
mod floor_plan;
mod hashing;

pub use entities::{load_entity_list, parse_entity_list, EntityListError};
pub use floor_plan::{
    builtin_floor_plan, load_floor_plan, parse_floor_plan, FloorPlan, FloorPlanError,
    FloorPlanErrorCode,
};
