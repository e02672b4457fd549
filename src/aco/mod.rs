pub mod colony;
pub mod construction;
pub mod parameters;
pub mod pheromone;
pub mod selection;
pub mod stats;
pub mod update;
