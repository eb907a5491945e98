//! Server-rendered HTML views.
//!
//! Pages are plain `format!` templates over a shared layout. Every value
//! that comes from the store or the caller goes through [`escape`].

use crate::models::{Demographics, Patient};

/// Escape text for HTML element content and quoted attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn opt(value: &Option<String>) -> String {
    escape(value.as_deref().unwrap_or(""))
}

fn layout(title: &str, nav: &str, body: &str) -> String {
    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} · ClinicDesk</title>
<link rel="stylesheet" href="/public/style.css">
<style>
body{{margin:0;font-family:-apple-system,BlinkMacSystemFont,'Segoe UI',Roboto,sans-serif;background:#f8fafc;color:#0f172a}}
header{{background:#0f766e;color:#fff;padding:12px 24px;display:flex;justify-content:space-between;align-items:center}}
header a{{color:#fff;margin-left:16px;text-decoration:none}}
main{{max-width:960px;margin:24px auto;padding:0 16px}}
table{{width:100%;border-collapse:collapse;background:#fff}}
th,td{{padding:8px;border-bottom:1px solid #e2e8f0;text-align:left}}
form label{{display:block;margin:8px 0 4px}}
form input,form textarea,form select{{width:100%;padding:8px;box-sizing:border-box}}
.btn{{display:inline-block;padding:8px 16px;background:#0f766e;color:#fff;border:none;border-radius:6px;text-decoration:none;cursor:pointer}}
.error{{color:#b91c1c}}
.muted{{color:#64748b}}
</style>
</head>
<body>
<header><strong>ClinicDesk</strong><nav>{nav}</nav></header>
<main>
{body}
</main>
</body>
</html>"##
    )
}

fn staff_nav(email: &str, links: &[(&str, &str)]) -> String {
    let mut nav: String = links
        .iter()
        .map(|(href, label)| format!(r#"<a href="{href}">{label}</a>"#))
        .collect();
    nav.push_str(&format!(
        r#"<span class="muted" style="margin-left:16px">{}</span><a href="/logout">Sign out</a>"#,
        escape(email)
    ));
    nav
}

const DOCTOR_LINKS: &[(&str, &str)] = &[
    ("/doctor/dashboard", "Queue"),
    ("/doctor/medicalrecords", "Medical records"),
    ("/overview", "Overview"),
];

const RECEPTIONIST_LINKS: &[(&str, &str)] = &[
    ("/receptionist/dashboard", "Patients"),
    ("/receptionist/addpatient", "Register patient"),
];

pub fn home_page() -> String {
    layout(
        "Welcome",
        r#"<a href="/signin">Sign in</a>"#,
        r#"<h1>ClinicDesk</h1>
<p>Front desk and consulting room, on one patient list.</p>
<p><a class="btn" href="/signin">Staff sign in</a></p>"#,
    )
}

pub fn signin_page(error: Option<&str>) -> String {
    let error_html = error
        .map(|e| format!(r#"<p class="error">{}</p>"#, escape(e)))
        .unwrap_or_default();
    layout(
        "Sign in",
        r#"<a href="/home">Home</a>"#,
        &format!(
            r#"<h1>Sign in</h1>
{error_html}
<form method="post" action="/signin">
<label for="email">Email</label><input id="email" name="email" type="email" required>
<label for="password">Password</label><input id="password" name="password" type="password" required>
<p><button class="btn" type="submit">Sign in</button></p>
</form>"#
        ),
    )
}

pub fn error_page(message: &str) -> String {
    layout(
        "Error",
        r#"<a href="/home">Home</a>"#,
        &format!(
            r#"<h1>Something went wrong</h1><p class="error">{}</p>"#,
            escape(message)
        ),
    )
}

fn patient_rows(patients: &[Patient], actions: impl Fn(&Patient) -> String) -> String {
    if patients.is_empty() {
        return r#"<tr><td colspan="5" class="muted">No patients yet.</td></tr>"#.to_string();
    }
    patients
        .iter()
        .map(|p| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                escape(p.display_name()),
                opt(&p.age),
                opt(&p.gender),
                opt(&p.phone),
                actions(p)
            )
        })
        .collect()
}

pub fn doctor_dashboard(email: &str, patients: &[Patient]) -> String {
    let rows = patient_rows(patients, |p| {
        let status = if p.has_clinical_data() { "Seen" } else { "Waiting" };
        format!(
            r#"{status} · <a href="/doctor/patient/{}">Open</a>"#,
            escape(&p.id)
        )
    });
    layout(
        "Doctor dashboard",
        &staff_nav(email, DOCTOR_LINKS),
        &format!(
            r#"<h1>Patient queue</h1>
<p class="muted">{count} patient(s)</p>
<table><thead><tr><th>Name</th><th>Age</th><th>Gender</th><th>Phone</th><th></th></tr></thead>
<tbody>{rows}</tbody></table>"#,
            count = patients.len()
        ),
    )
}

pub fn patient_info(email: &str, patient: &Patient) -> String {
    let id = escape(&patient.id);
    let field = |name: &str, label: &str, value: &Option<String>| {
        format!(
            r#"<label for="{name}">{label}</label><input id="{name}" name="{name}" value="{}">"#,
            opt(value)
        )
    };
    let body = format!(
        r#"<h1>{name}</h1>
<p class="muted">Age {age} · {gender} · DOB {dob} · {phone}</p>
<form id="clinical-form" data-patient-id="{id}">
{height}{heart_rate}{blood_pressure}{glucose}
<label for="symptoms">Symptoms</label><textarea id="symptoms" name="symptoms">{symptoms}</textarea>
<label for="diagnosis">Diagnosis</label><textarea id="diagnosis" name="diagnosis">{diagnosis}</textarea>
<label for="prescription">Prescription</label><textarea id="prescription" name="prescription">{prescription}</textarea>
<p><button class="btn" type="submit">Save</button> <span id="status" class="muted"></span></p>
</form>
<script>
document.getElementById('clinical-form').addEventListener('submit',function(e){{
  e.preventDefault();
  var body={{patientId:this.dataset.patientId}};
  new FormData(this).forEach(function(v,k){{body[k]=v;}});
  fetch('/doctor/patients',{{method:'PUT',headers:{{'Content-Type':'application/json'}},body:JSON.stringify(body)}})
    .then(function(r){{return r.json();}})
    .then(function(j){{document.getElementById('status').textContent=j.message;}});
}});
</script>"#,
        name = escape(patient.display_name()),
        age = opt(&patient.age),
        gender = opt(&patient.gender),
        dob = opt(&patient.dob),
        phone = opt(&patient.phone),
        height = field("height", "Height", &patient.height),
        heart_rate = field("heartRate", "Heart rate", &patient.heart_rate),
        blood_pressure = field("bloodPressure", "Blood pressure", &patient.blood_pressure),
        glucose = field("glucoseLevel", "Glucose level", &patient.glucose_level),
        symptoms = opt(&patient.symptoms),
        diagnosis = opt(&patient.diagnosis),
        prescription = opt(&patient.prescription),
    );
    layout("Patient", &staff_nav(email, DOCTOR_LINKS), &body)
}

pub fn medical_records(email: &str, patients: &[Patient]) -> String {
    let rows: String = if patients.is_empty() {
        r#"<tr><td colspan="6" class="muted">No records.</td></tr>"#.to_string()
    } else {
        patients
            .iter()
            .map(|p| {
                format!(
                    "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                    escape(p.display_name()),
                    opt(&p.blood_pressure),
                    opt(&p.heart_rate),
                    opt(&p.symptoms),
                    opt(&p.diagnosis),
                    opt(&p.prescription)
                )
            })
            .collect()
    };
    layout(
        "Medical records",
        &staff_nav(email, DOCTOR_LINKS),
        &format!(
            r#"<h1>Medical records</h1>
<table><thead><tr><th>Name</th><th>BP</th><th>Heart rate</th><th>Symptoms</th><th>Diagnosis</th><th>Prescription</th></tr></thead>
<tbody>{rows}</tbody></table>"#
        ),
    )
}

pub fn overview(email: &str, patients: &[Patient]) -> String {
    let seen = patients.iter().filter(|p| p.has_clinical_data()).count();
    layout(
        "Overview",
        &staff_nav(email, DOCTOR_LINKS),
        &format!(
            r#"<h1>Overview</h1>
<p>{total} registered · {seen} seen · {waiting} waiting</p>"#,
            total = patients.len(),
            waiting = patients.len() - seen
        ),
    )
}

/// Doctor's lookup page: every record with a link to its detail view.
pub fn patient_lookup(email: &str, patients: &[Patient]) -> String {
    let items: String = patients
        .iter()
        .map(|p| {
            format!(
                r#"<li><a href="/doctor/patient/{}">{}</a> <span class="muted">{}</span></li>"#,
                escape(&p.id),
                escape(p.display_name()),
                opt(&p.dob)
            )
        })
        .collect();
    layout(
        "Patient information",
        &staff_nav(email, DOCTOR_LINKS),
        &format!("<h1>Patient information</h1>\n<ul>{items}</ul>"),
    )
}

pub fn receptionist_dashboard(email: &str, patients: &[Patient]) -> String {
    let rows = patient_rows(patients, |p| {
        let id = escape(&p.id);
        format!(
            r##"<a href="/receptionist/editpatient/{id}">Edit</a> · <a href="#" data-delete="{id}">Delete</a>"##
        )
    });
    layout(
        "Receptionist dashboard",
        &staff_nav(email, RECEPTIONIST_LINKS),
        &format!(
            r#"<h1>Patients</h1>
<p><a class="btn" href="/receptionist/addpatient">Register patient</a></p>
<table><thead><tr><th>Name</th><th>Age</th><th>Gender</th><th>Phone</th><th></th></tr></thead>
<tbody>{rows}</tbody></table>
<script>
document.querySelectorAll('[data-delete]').forEach(function(a){{
  a.addEventListener('click',function(e){{
    e.preventDefault();
    if(!confirm('Delete this patient?'))return;
    fetch('/receptionist/deletepatient/'+a.dataset.delete,{{method:'DELETE'}})
      .then(function(r){{if(r.ok)location.reload();}});
  }});
}});
</script>"#
        ),
    )
}

fn demographics_form(action: &str, submit: &str, values: &Demographics) -> String {
    format!(
        r#"<form method="post" action="{action}">
<label for="name">Full name</label><input id="name" name="name" value="{name}" required>
<label for="age">Age</label><input id="age" name="age" value="{age}">
<label for="dob">Date of birth</label><input id="dob" name="dob" type="date" value="{dob}">
<label for="gender">Gender</label><input id="gender" name="gender" value="{gender}">
<label for="maritalStatus">Marital status</label><input id="maritalStatus" name="maritalStatus" value="{marital}">
<label for="phone">Phone</label><input id="phone" name="phone" value="{phone}">
<label for="email">Email</label><input id="email" name="email" type="email" value="{email}">
<label for="address">Address</label><input id="address" name="address" value="{address}">
<p><button class="btn" type="submit">{submit}</button></p>
</form>"#,
        action = escape(action),
        name = opt(&values.name),
        age = opt(&values.age),
        dob = opt(&values.dob),
        gender = opt(&values.gender),
        marital = opt(&values.marital_status),
        phone = opt(&values.phone),
        email = opt(&values.email),
        address = opt(&values.address),
    )
}

pub fn add_patient(email: &str) -> String {
    layout(
        "Register patient",
        &staff_nav(email, RECEPTIONIST_LINKS),
        &format!(
            "<h1>Register patient</h1>\n{}",
            demographics_form("/receptionist/addpatient", "Register", &Demographics::default())
        ),
    )
}

pub fn edit_patient(email: &str, patient: &Patient) -> String {
    layout(
        "Edit patient",
        &staff_nav(email, RECEPTIONIST_LINKS),
        &format!(
            "<h1>Edit {}</h1>\n{}",
            escape(patient.display_name()),
            demographics_form(
                &format!("/receptionist/updatepatient/{}", patient.id),
                "Save changes",
                &patient.demographics()
            )
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ClinicalUpdate;

    fn patient() -> Patient {
        Patient::new(
            "p-1",
            Demographics {
                name: Some("<script>alert(1)</script>".into()),
                phone: Some("0800".into()),
                ..Default::default()
            },
        )
    }

    #[test]
    fn escape_handles_markup_characters() {
        assert_eq!(escape(r#"<a href="x">&'"#), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn dashboards_escape_patient_values() {
        let html = doctor_dashboard("doc@clinic.test", &[patient()]);
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("/doctor/patient/p-1"));
    }

    #[test]
    fn empty_queue_says_so() {
        assert!(doctor_dashboard("d", &[]).contains("No patients yet."));
        assert!(receptionist_dashboard("r", &[]).contains("No patients yet."));
    }

    #[test]
    fn edit_form_is_prefilled_and_posts_to_update() {
        let html = edit_patient("desk@clinic.test", &patient());
        assert!(html.contains(r#"action="/receptionist/updatepatient/p-1""#));
        assert!(html.contains(r#"value="0800""#));
    }

    #[test]
    fn add_form_is_blank() {
        let html = add_patient("desk@clinic.test");
        assert!(html.contains(r#"action="/receptionist/addpatient""#));
        assert!(html.contains(r#"name="maritalStatus" value="""#));
    }

    #[test]
    fn patient_info_shows_clinical_values() {
        let mut p = patient();
        p.merge_clinical(ClinicalUpdate {
            diagnosis: Some("flu".into()),
            ..Default::default()
        });
        let html = patient_info("doc@clinic.test", &p);
        assert!(html.contains(">flu</textarea>"));
        assert!(html.contains(r#"data-patient-id="p-1""#));
    }

    #[test]
    fn overview_counts_seen_and_waiting() {
        let mut seen = patient();
        seen.merge_clinical(ClinicalUpdate {
            symptoms: Some("fever".into()),
            ..Default::default()
        });
        let html = overview("doc@clinic.test", &[seen, patient()]);
        assert!(html.contains("2 registered · 1 seen · 1 waiting"));
    }

    #[test]
    fn signin_page_shows_error_when_given() {
        assert!(signin_page(Some("Invalid credentials")).contains("Invalid credentials"));
        assert!(!signin_page(None).contains(r#"class="error""#));
    }
}
