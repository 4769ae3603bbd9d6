pub mod categorymodel;
pub mod jobmodel;
pub mod listingmodel;
pub mod profilemodel;
pub mod workermodel;
