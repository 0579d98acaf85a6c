//! Fixed demo catalog. Keys are trimmed, lowercased user input.

use crate::models::{Button, ChatTurn};

use super::ChartFixtures;

pub type ReplyBuilder = fn(&ChartFixtures) -> ChatTurn;

pub const FALLBACK_TEXT: &str = "Unknown message for this demo :(";

pub const CAPABILITIES: &str = "Here are my capabilities:

- List of warehouses
- Warehouse summary
- Units summary in a warehouse
- Warehouse unit list
- Warehouse sensor status
- Unit-level sensor status
- Sensor data value aggregation [Min, Max, etc.] in given time range
- Sensor data chart/report
- Report download [PDF/XLSX]
- List sensors in warehouse
- List of units that are normal/out
- List of sensors that are normal/out
- Count of units in a warehouse that are normal/out
- Count of sensors in a warehouse/unit/overall that are normal/out

Let me know if there's anything specific you would like to know or any task you would like me to perform.
";

pub const VERNA_STATUS: &str = "Status of Warehouse Verna:
- Emergencies: Normal
- Metrics Out of Range: 8
- Power Consumption: 5410.0 KWH (Normal)
- Attendance: Normal";

pub const UNITS_OUT: &str = "The following units in the warehouse have sensors that are out of range:

- Unit: B2 Basement
  - Number of out_of_range sensors: 2
  - Status: OUT_OF_RANGE

- Unit: B1 Cipla
  - Number of out_of_range sensors: 2
  - Status: OUT_OF_RANGE

- Unit: B3 AC
  - Number of out_of_range sensors: 1
  - Status: OUT_OF_RANGE";

pub const B1_CIPLA_TEMP_STATUS: &str = "Status of Temperature sensors in Unit B1 Cipla:
- Sensor Name: B1 Cipla 1_temp
  - Status: NORMAL
  - Last Value: 27.1°C";

pub const B1_CIPLA_RH_STATUS: &str = "Status of Relative Humidity (RH) sensors in Unit B1 Cipla:
- Sensor Name: B1 Cipla 1_rh
  - Status: NORMAL
  - Last Value: 56.2%";

pub const B1_CIPLA_TEMP_REPORT: &str =
    "Report: Temperature for B1 Cipla 1_temp [2023-08-02 00:00:00 till 2023-08-02 23:59:59, 1H interval]";

pub const B1_CIPLA_RH_REPORT: &str =
    "Report: Humidity for B1 Cipla 1_rh [2023-08-02 00:00:00 till 2023-08-02 23:59:59, 1H interval]";

pub const XLSX_READY: &str =
    "Report ready for download: B1 Cipla 1_rh [2023-08-02 00:00:00 till 2023-08-02 23:59:59, 1H interval]";

pub const B2_BASEMENT_TEMP: &str = "B2 Basement 1_temp:
  - Status: NORMAL
  - Last value: 22.7°C";

pub const OOR_UNITS: &str = "- B1 Cipla (OUT_OF_RANGE)
- B3 AC (OUT_OF_RANGE)
- B2 Basement (OUT_OF_RANGE)
";

pub const ENTRIES: &[(&str, ReplyBuilder)] = &[
    ("hello", hello),
    ("what can you do?", capabilities),
    ("list of warehouses", list_of_warehouses),
    ("status of verna", status_of_verna),
    ("any units out?", any_units_out),
    ("b1 cipla temperature sensor status", b1_cipla_temperature_status),
    ("and rh?", b1_cipla_rh_status),
    (
        "b1 cipla temperature sensor chart for yesterday, 1h interval",
        b1_cipla_temperature_chart,
    ),
    ("rh sensor in same unit", b1_cipla_rh_chart),
    ("download xlsx", download_xlsx),
    ("b2 basement temperature", b2_basement_temperature),
    ("get sensor max", get_sensor_max),
    ("get unit status", get_unit_status),
    ("out of range unit list", out_of_range_unit_list),
];

fn hello(_: &ChartFixtures) -> ChatTurn {
    ChatTurn::ai("Hello! How can I assist you today?").with_buttons(["What can you do?"])
}

fn capabilities(_: &ChartFixtures) -> ChatTurn {
    ChatTurn::ai(CAPABILITIES)
}

fn list_of_warehouses(_: &ChartFixtures) -> ChatTurn {
    ChatTurn::ai("- Warehouse: Verna")
        .with_buttons(["Verna warehouse status", "List inactive warehouses"])
}

fn status_of_verna(_: &ChartFixtures) -> ChatTurn {
    ChatTurn::ai(VERNA_STATUS).with_buttons(["Number of units", "Inactive unit list"])
}

fn any_units_out(_: &ChartFixtures) -> ChatTurn {
    ChatTurn::ai(UNITS_OUT).with_buttons(["Number of out of range units"])
}

fn b1_cipla_temperature_status(_: &ChartFixtures) -> ChatTurn {
    ChatTurn::ai(B1_CIPLA_TEMP_STATUS).with_buttons(["Chart", "Sensor trends"])
}

fn b1_cipla_rh_status(_: &ChartFixtures) -> ChatTurn {
    ChatTurn::ai(B1_CIPLA_RH_STATUS).with_buttons(["Chart", "Sensor trends"])
}

fn b1_cipla_temperature_chart(charts: &ChartFixtures) -> ChatTurn {
    ChatTurn::ai(B1_CIPLA_TEMP_REPORT)
        .with_chart(charts.temperature.clone())
        .with_buttons(["Download PDF", "Download XLSX"])
}

fn b1_cipla_rh_chart(charts: &ChartFixtures) -> ChatTurn {
    ChatTurn::ai(B1_CIPLA_RH_REPORT)
        .with_chart(charts.humidity.clone())
        .with_buttons(["Download PDF", "Download XLSX"])
}

fn download_xlsx(_: &ChartFixtures) -> ChatTurn {
    ChatTurn::ai(XLSX_READY).with_buttons([Button::from_tokens(&[
        ":page_facing_up:",
        "View attachment",
    ])])
}

fn b2_basement_temperature(_: &ChartFixtures) -> ChatTurn {
    ChatTurn::ai(B2_BASEMENT_TEMP).with_buttons([
        "Get sensor max",
        "Get sensor min",
        "Get sensor average",
    ])
}

fn get_sensor_max(_: &ChartFixtures) -> ChatTurn {
    ChatTurn::ai("Maximum value: 22.9°C").with_buttons([
        "Get sensor min",
        "Get sensor average",
        "Get unit status",
    ])
}

fn get_unit_status(_: &ChartFixtures) -> ChatTurn {
    ChatTurn::ai("Status: OUT_OF_RANGE").with_buttons([
        "Out of range unit list",
        "Get sensors min",
        "Get sensors max",
    ])
}

fn out_of_range_unit_list(_: &ChartFixtures) -> ChatTurn {
    ChatTurn::ai(OOR_UNITS).with_buttons(["Normal units", "Inactive units", "Warehouse info"])
}
