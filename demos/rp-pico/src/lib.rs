#![no_std]

pub mod button;
pub mod oled;
pub mod scheduler;
pub mod time;
