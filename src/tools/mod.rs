pub mod piano;
