pub mod frost_window;
