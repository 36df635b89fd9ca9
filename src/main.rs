// Demo application
// Runs the week grid in a native window with a couple of sample calendars.

use chrono::{Duration, Utc};
use slotgrid::models::event::{CalendarEvent, CalendarSource};
use slotgrid::ui_egui::SlotGrid;
use slotgrid::{GridConfig, Scheduler};

struct DemoApp {
    scheduler: Scheduler,
}

impl DemoApp {
    fn new() -> anyhow::Result<Self> {
        let config = GridConfig::builder()
            .time_zone_name("Europe/Stockholm")?
            .build()?;

        let mut scheduler = Scheduler::new(config, Vec::new())?;
        scheduler.set_calendars(vec![
            CalendarSource {
                id: "work".to_string(),
                title: "Work".to_string(),
                color: Some("#2196f3".to_string()),
                selected: true,
            },
            CalendarSource {
                id: "private".to_string(),
                title: "Private".to_string(),
                color: Some("#e91e63".to_string()),
                selected: true,
            },
        ]);
        scheduler.set_events(sample_events()?);

        Ok(Self { scheduler })
    }
}

impl eframe::App for DemoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(selections) = SlotGrid::new(&mut self.scheduler).show(ui) {
                match serde_json::to_string(&selections) {
                    Ok(json) => log::info!("selections changed: {json}"),
                    Err(err) => log::warn!("failed to encode selections: {err}"),
                }
            }
        });
    }
}

fn sample_events() -> anyhow::Result<Vec<CalendarEvent>> {
    let today_morning = Utc::now()
        .date_naive()
        .and_hms_opt(8, 0, 0)
        .expect("valid time")
        .and_utc();

    Ok(vec![
        CalendarEvent::builder()
            .title("Standup")
            .start(today_morning + Duration::days(1))
            .end(today_morning + Duration::days(1) + Duration::minutes(30))
            .background_color("#2196f3")
            .calendar_id("work")
            .build()?,
        CalendarEvent::builder()
            .title("Dentist")
            .start(today_morning + Duration::days(2) + Duration::hours(6))
            .end(today_morning + Duration::days(2) + Duration::hours(7))
            .background_color("#e91e63")
            .calendar_id("private")
            .build()?,
    ])
}

fn main() -> eframe::Result<()> {
    env_logger::init();

    log::info!("starting slotgrid demo");

    let app = match DemoApp::new() {
        Ok(app) => app,
        Err(err) => {
            log::error!("failed to initialize: {err:#}");
            std::process::exit(1);
        }
    };

    eframe::run_native(
        "Slotgrid",
        eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([960.0, 720.0])
                .with_min_inner_size([640.0, 480.0]),
            ..Default::default()
        },
        Box::new(move |_cc| Ok(Box::new(app))),
    )
}
