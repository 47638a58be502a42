use crate::models::{HistoryResponse, MealType, MetricsResponse, VitalsResponse};
use std::fmt::Write;

pub struct DashboardView<'a> {
    pub metrics: &'a MetricsResponse,
    pub vitals: &'a VitalsResponse,
    pub history: &'a HistoryResponse,
}

pub fn render_index(view: &DashboardView<'_>) -> String {
    let metrics = view.metrics;
    let vitals = view.vitals;
    let patient = &view.history.patient;

    let (connection_label, connection_button, connection_class) = if vitals.connected {
        (
            format!("Connected to {}", vitals.device.unwrap_or("chair")),
            "Disconnect",
            "on",
        )
    } else {
        ("Not Connected".to_string(), "Connect", "off")
    };

    let (alert_class, alert_badge, alert_body) = match &vitals.alert.message {
        Some(message) if vitals.alert.active => (
            "alert active",
            "ALERT ACTIVE",
            format!(
                "<p><strong>Critical Alert:</strong> {message} ({} BPM)</p><ul>{}</ul>",
                vitals.heart_rate,
                doctor_rows(vitals)
            ),
        ),
        _ => (
            "alert",
            "NORMAL",
            "<p>All vital signs within normal parameters.</p>".to_string(),
        ),
    };

    INDEX_HTML
        .replace("{{DATE}}", &metrics.date)
        .replace("{{PATIENT_NAME}}", patient.name)
        .replace("{{PATIENT_AGE}}", &patient.age.to_string())
        .replace("{{PATIENT_ROOM}}", patient.room)
        .replace("{{PATIENT_CONDITION}}", patient.condition)
        .replace("{{CONNECTION_CLASS}}", connection_class)
        .replace("{{CONNECTION_LABEL}}", &connection_label)
        .replace("{{CONNECTION_BUTTON}}", connection_button)
        .replace("{{HEART_RATE}}", &vitals.heart_rate.to_string())
        .replace("{{BLOOD_PRESSURE}}", vitals.blood_pressure)
        .replace("{{GLUCOSE}}", &vitals.glucose.to_string())
        .replace("{{OXYGEN}}", &vitals.oxygen_saturation.to_string())
        .replace("{{ALERT_CLASS}}", alert_class)
        .replace("{{ALERT_BADGE}}", alert_badge)
        .replace("{{ALERT_BODY}}", &alert_body)
        .replace("{{STEPS}}", &metrics.steps.completed.to_string())
        .replace("{{STEP_GOAL}}", &metrics.steps.goal.to_string())
        .replace("{{STEP_PERCENT}}", &metrics.steps.percent.to_string())
        .replace("{{CAL_CONSUMED}}", &metrics.calories.consumed.to_string())
        .replace("{{CAL_BURNED}}", &metrics.calories.burned.to_string())
        .replace("{{CAL_NET}}", &metrics.calories.net.to_string())
        .replace("{{NUTRITION_ROWS}}", &nutrition_rows(metrics))
        .replace("{{MEAL_BUTTONS}}", &meal_buttons())
        .replace("{{TREND_ROWS}}", &trend_rows(metrics))
        .replace("{{HISTORY_ROWS}}", &history_rows(view.history))
}

fn nutrition_rows(metrics: &MetricsResponse) -> String {
    metrics.nutrition.iter().fold(String::new(), |mut out, bar| {
        let _ = write!(
            out,
            r#"<div class="bar"><span>{name}</span><div class="track"><div class="fill" style="width: {value}%"></div></div><span>{value}%</span></div>"#,
            name = bar.name,
            value = bar.value.min(bar.max),
        );
        out
    })
}

fn meal_buttons() -> String {
    MealType::ALL.iter().fold(String::new(), |mut out, meal| {
        let _ = write!(
            out,
            r#"<form method="post" action="/meal/{meal}"><button type="submit">Log {meal}</button></form>"#
        );
        out
    })
}

fn trend_rows(metrics: &MetricsResponse) -> String {
    metrics
        .tiredness_trend
        .iter()
        .fold(String::new(), |mut out, point| {
            let _ = write!(
                out,
                r#"<div class="day"><div class="column" style="height: {height}%"></div><span>{day}</span><small>{tiredness}</small></div>"#,
                height = point.tiredness.min(10) * 10,
                day = point.day,
                tiredness = point.tiredness,
            );
            out
        })
}

fn history_rows(history: &HistoryResponse) -> String {
    history.events.iter().fold(String::new(), |mut out, event| {
        let _ = write!(
            out,
            "<li><time>{}</time><strong>{}</strong><span>{}</span><em>{}</em><small>{}</small></li>",
            event.date, event.kind, event.description, event.status, event.doctor
        );
        out
    })
}

fn doctor_rows(vitals: &VitalsResponse) -> String {
    vitals
        .alert
        .nearby_doctors
        .iter()
        .fold(String::new(), |mut out, doctor| {
            let _ = write!(
                out,
                "<li>{} &middot; {} &middot; {} ({})</li>",
                doctor.name, doctor.specialty, doctor.distance, doctor.status
            );
            out
        })
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <meta http-equiv="refresh" content="30" />
  <title>Hospital Chair Monitor</title>
  <style>
    :root {
      --bg: #eef4fb;
      --ink: #1f2933;
      --muted: #61707d;
      --card: #ffffff;
      --accent: #2563eb;
      --ok: #15803d;
      --danger: #b91c1c;
      --shadow: 0 12px 32px rgba(31, 41, 51, 0.08);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      background: linear-gradient(160deg, var(--bg), #ffffff 70%);
      color: var(--ink);
      font-family: "Inter", "Segoe UI", sans-serif;
      padding: 24px;
    }

    main {
      max-width: 1180px;
      margin: 0 auto;
      display: grid;
      gap: 20px;
    }

    header {
      display: flex;
      justify-content: space-between;
      align-items: center;
    }

    h1 {
      margin: 0;
      font-size: 1.9rem;
    }

    h2 {
      margin: 0 0 12px;
      font-size: 1.1rem;
    }

    .subtitle,
    small {
      color: var(--muted);
    }

    .grid {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(240px, 1fr));
      gap: 20px;
    }

    .card {
      background: var(--card);
      border-radius: 14px;
      box-shadow: var(--shadow);
      padding: 20px;
    }

    .reading {
      font-size: 2rem;
      font-weight: 700;
    }

    .connection {
      display: flex;
      justify-content: space-between;
      align-items: center;
    }

    .connection.on .status {
      color: var(--ok);
    }

    .connection.off .status {
      color: var(--muted);
    }

    button {
      border: none;
      border-radius: 8px;
      padding: 8px 14px;
      background: var(--accent);
      color: #fff;
      cursor: pointer;
      text-transform: capitalize;
    }

    .meals {
      display: flex;
      gap: 8px;
      margin-top: 12px;
    }

    .bar {
      display: grid;
      grid-template-columns: 90px 1fr 48px;
      align-items: center;
      gap: 10px;
      margin-bottom: 8px;
    }

    .track {
      background: #e5e7eb;
      border-radius: 999px;
      height: 8px;
    }

    .fill {
      background: var(--ok);
      border-radius: 999px;
      height: 8px;
    }

    .trend {
      display: flex;
      align-items: flex-end;
      gap: 10px;
      height: 160px;
    }

    .day {
      flex: 1;
      display: flex;
      flex-direction: column;
      align-items: center;
      justify-content: flex-end;
      height: 100%;
    }

    .column {
      width: 100%;
      background: var(--accent);
      border-radius: 6px 6px 0 0;
    }

    .alert {
      border: 2px solid #bbf7d0;
    }

    .alert.active {
      border-color: var(--danger);
      background: #fef2f2;
    }

    .badge {
      float: right;
      font-size: 0.8rem;
      font-weight: 600;
    }

    .alert.active .badge {
      color: var(--danger);
    }

    ul.history {
      list-style: none;
      margin: 0;
      padding: 0;
      display: grid;
      gap: 10px;
    }

    ul.history li {
      display: grid;
      grid-template-columns: 100px 120px 1fr 90px 150px;
      gap: 10px;
    }
  </style>
</head>
<body>
  <main>
    <header>
      <div>
        <h1>Hospital Chair Monitor</h1>
        <p class="subtitle">Real-time patient monitoring system</p>
      </div>
      <small>{{DATE}}</small>
    </header>

    <section class="card connection {{CONNECTION_CLASS}}">
      <div>
        <h2>Hospital Chair Connection</h2>
        <p class="status">{{CONNECTION_LABEL}}</p>
      </div>
      <form method="post" action="/connection/toggle">
        <button type="submit">{{CONNECTION_BUTTON}}</button>
      </form>
    </section>

    <section class="card">
      <h2>Patient Information</h2>
      <div class="grid">
        <div><small>Name</small><p>{{PATIENT_NAME}}</p></div>
        <div><small>Age</small><p>{{PATIENT_AGE}}</p></div>
        <div><small>Location</small><p>{{PATIENT_ROOM}}</p></div>
        <div><small>Condition</small><p>{{PATIENT_CONDITION}}</p></div>
      </div>
    </section>

    <section class="grid">
      <div class="card"><h2>Heart Rate</h2><div class="reading">{{HEART_RATE}}</div><small>BPM</small></div>
      <div class="card"><h2>Blood Pressure</h2><div class="reading">{{BLOOD_PRESSURE}}</div><small>mmHg</small></div>
      <div class="card"><h2>Glucose Level</h2><div class="reading">{{GLUCOSE}}</div><small>mg/dL</small></div>
      <div class="card"><h2>Oxygen Sat</h2><div class="reading">{{OXYGEN}}</div><small>%</small></div>
    </section>

    <section class="grid">
      <div class="card">
        <h2>Daily Tiredness Level</h2>
        <div class="trend">{{TREND_ROWS}}</div>
      </div>
      <div class="card">
        <h2>Nutrition &amp; Vitamins</h2>
        {{NUTRITION_ROWS}}
        <div class="meals">{{MEAL_BUTTONS}}</div>
      </div>
      <div class="card">
        <h2>Daily Calories</h2>
        <p>Consumed <strong>{{CAL_CONSUMED}}</strong> kcal</p>
        <p>Burned <strong>{{CAL_BURNED}}</strong> kcal</p>
        <p>Net <strong>{{CAL_NET}}</strong> kcal</p>
      </div>
      <div class="card">
        <h2>Daily Steps</h2>
        <div class="reading">{{STEPS}}</div>
        <small>of {{STEP_GOAL}} goal</small>
        <div class="track"><div class="fill" style="width: {{STEP_PERCENT}}%"></div></div>
      </div>
    </section>

    <section class="card {{ALERT_CLASS}}">
      <span class="badge">{{ALERT_BADGE}}</span>
      <h2>Emergency Monitoring</h2>
      {{ALERT_BODY}}
    </section>

    <section class="card">
      <h2>Medical History</h2>
      <ul class="history">{{HISTORY_ROWS}}</ul>
    </section>
  </main>
</body>
</html>
"#;
