//! Seeded sample plans for demo mode.

use crate::domain::{Day, LessonPlan, PlanData, PlanId};

/// The sample week shown when no persistence backend is available.
#[must_use]
#[allow(clippy::missing_panics_doc)] // seed literals are statically valid
pub fn demo_plans() -> Vec<LessonPlan> {
    let seed = [
        (
            "1",
            "Introduction to Algebra",
            "Math",
            "Variables, expressions, and solving simple equations.",
            60,
            "Understand what a variable is; solve one-step equations",
            "Whiteboard, worksheet 3A",
            Day::Monday,
            Some("9:00 AM - 10:00 AM"),
        ),
        (
            "2",
            "The Water Cycle",
            "Science",
            "Evaporation, condensation, and precipitation with a class demo.",
            45,
            "Describe the stages of the water cycle",
            "Kettle, cold tray, diagram handout",
            Day::Monday,
            Some("11:00 AM - 11:45 AM"),
        ),
        (
            "3",
            "Creative Writing: Setting",
            "English",
            "Building a vivid setting from sensory detail.",
            50,
            "Draft an opening paragraph grounded in place",
            "Prompt cards, notebooks",
            Day::Tuesday,
            None,
        ),
        (
            "4",
            "Ancient Egypt",
            "History",
            "Daily life along the Nile; primary-source photographs.",
            55,
            "Identify three ways the Nile shaped Egyptian society",
            "Photo packet, map of the Nile",
            Day::Wednesday,
            Some("1:00 PM - 1:55 PM"),
        ),
        (
            "5",
            "Fractions Review",
            "Math",
            "Mixed practice ahead of Friday's quiz.",
            40,
            "Add and subtract unlike fractions fluently",
            "Practice sheets 5B and 5C",
            Day::Thursday,
            None,
        ),
        (
            "6",
            "Watercolour Landscapes",
            "Art",
            "Wet-on-wet technique; horizon lines and depth.",
            90,
            "Complete a three-layer landscape study",
            "Watercolours, heavy paper, brushes",
            Day::Friday,
            Some("10:00 AM - 11:30 AM"),
        ),
    ];

    seed.into_iter()
        .map(
            |(id, title, subject, description, minutes, objectives, materials, day, slot)| {
                LessonPlan::new(
                    PlanId::from(id),
                    PlanData {
                        title: title.to_string(),
                        subject: subject.to_string(),
                        description: description.to_string(),
                        duration_minutes: minutes,
                        objectives: objectives.to_string(),
                        materials: materials.to_string(),
                        day,
                        time_slot: slot.map(ToString::to_string),
                    },
                )
                .expect("demo data is valid")
            },
        )
        .collect()
}
