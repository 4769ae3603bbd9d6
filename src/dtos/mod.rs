pub mod commondtos;
pub mod jobdtos;
pub mod profiledtos;
pub mod workerdtos;
