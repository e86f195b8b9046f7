mod app;
mod guide;
mod login;
mod student;
mod widgets;

pub use app::launch_gui;
