mod app;
mod commands;
pub mod domain;
mod infra;
mod shared;
pub mod shell;

pub(crate) use app::{app_state, background};
pub(crate) use infra::{app_paths, settings};
pub(crate) use shared::blocking;

use app_state::HostState;
use commands::*;
use shell::{ShellRegistry, WebviewDocument};
use std::time::Duration;
use tauri::Manager;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    let app = tauri::Builder::default()
        .manage(ShellRegistry::<WebviewDocument>::default())
        .on_window_event(crate::app::window::on_window_event)
        .setup(|app| {
            let (settings, read_error) = match settings::read(app.handle()) {
                Ok(settings) => (settings, None),
                Err(err) => (settings::AppSettings::default(), Some(err)),
            };

            crate::app::logging::init(app.handle(), &settings.log_level);
            if let Some(err) = read_error {
                tracing::warn!("settings read failed, using defaults: {}", err);
            }

            #[cfg(debug_assertions)]
            {
                if let Ok(dir) = app_paths::app_data_dir(app.handle()) {
                    tracing::info!(dir = %dir.display(), "[dev] app data dir");
                }
            }

            let state = HostState::new(&settings);
            state.set_power_sampler(background::spawn_power_sampler(
                state.power_handle(),
                Duration::from_millis(settings.power_sample_interval_ms),
            ));
            tracing::info!(
                clock_mode = ?settings.clock_mode,
                push_interval_ms = settings.push_interval_ms,
                initial_power = settings.initial_power,
                "host state ready"
            );
            app.manage(state);

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            setup,
            greet,
            get_clock,
            get_power,
            reset_power,
            get_timer_list,
            push_timer,
            get_timer_by_index,
            login,
            logout,
            get_login,
            settings_get,
            settings_set,
            shell_ready,
            shell_submit,
            shell_unload
        ])
        .build(tauri::generate_context!())
        .expect("error while building tauri application");

    app.run(|app_handle, event| {
        if let tauri::RunEvent::ExitRequested { .. } = &event {
            tracing::info!("exit requested, cleaning up");
            crate::app::cleanup::cleanup_before_exit(app_handle);
        }
    });
}
