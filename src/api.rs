pub mod automods;
