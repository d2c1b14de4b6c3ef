//! Static demo course content served by the course endpoint.

use crate::models::Slide;

/// Identifier reported by the tutor metadata probe.
pub const TUTOR_ID: &str = "GEOMETRY";

/// The ordered geometry demo lesson: three rules, then the practice
/// problem with its diagram.
pub fn demo_course() -> Vec<Slide> {
    vec![
        Slide {
            content: "Lets get started with this geometry lesson! Rule 1: Two opposite vertical \
                      angles formed when two lines intersect each other are always equal to each \
                      other"
                .to_string(),
            image_url: None,
        },
        Slide {
            content: "Moving on to rule two, Angles made by a transversal with parallel lines — \
                      corresponding or alternate interior angles are congruent"
                .to_string(),
            image_url: None,
        },
        Slide {
            content: "And finally adjacent angles on a straight line sum to 180 degrees."
                .to_string(),
            image_url: None,
        },
        Slide {
            content: "That's it for the lesson! Let's move on to a simple problem. Can you find \
                      the value of x such that line L and line M are parallel to each other? \
                      Let's start by writing down the problem."
                .to_string(),
            image_url: Some(
                "https://phujfghgjwpcvyjywlax.supabase.co/storage/v1/object/public/visor/question/geometry_problem.jpeg"
                    .to_string(),
            ),
        },
    ]
}
