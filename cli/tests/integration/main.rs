// Integration tests for the control panel
mod control_panel_tests;
mod rendering_tests;
