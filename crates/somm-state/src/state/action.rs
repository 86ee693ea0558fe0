use super::*;

mod manage_cellars;
mod schedule_cork;
mod update_params;
