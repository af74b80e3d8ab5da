use egui::{Color32, Pos2};

// Path the pointer is currently drawing on the canvas
#[derive(Debug, Clone)]
pub struct ActiveStroke {
    points: Vec<Pos2>,
    color: Color32,
    thickness: f32,
}

impl ActiveStroke {
    // Begin a path at the pointer position
    pub fn begin(start: Pos2, color: Color32, thickness: f32) -> Self {
        Self {
            points: vec![start],
            color,
            thickness,
        }
    }

    /// Extend the path and return the segment that still needs painting.
    pub fn extend_to(&mut self, point: Pos2) -> Option<(Pos2, Pos2)> {
        let from = self.last_point()?;
        self.points.push(point);
        Some((from, point))
    }

    fn last_point(&self) -> Option<Pos2> {
        self.points.last().copied()
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn thickness(&self) -> f32 {
        self.thickness
    }
}
