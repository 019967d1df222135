use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// Fixed evaluation order used for tie-breaks and corner turns.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    pub fn parse_move(value: &str) -> Option<Self> {
        match value {
            "up" => Some(Self::Up),
            "right" => Some(Self::Right),
            "down" => Some(Self::Down),
            "left" => Some(Self::Left),
            _ => None,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Right => Self::Left,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
        }
    }

    /// Unit step in tile space. The grid's y axis grows upward.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, 1),
            Self::Right => (1, 0),
            Self::Down => (0, -1),
            Self::Left => (-1, 0),
        }
    }

    pub fn offset(self, x: i32, y: i32, distance: i32) -> (i32, i32) {
        let (dx, dy) = self.delta();
        (x + dx * distance, y + dy * distance)
    }

    pub fn is_vertical(self) -> bool {
        matches!(self, Self::Up | Self::Down)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tile {
    Wall,
    Open,
    SmallItem,
    PowerItem,
    Portal,
    PenGate,
    PenInterior,
}

impl Tile {
    pub fn from_glyph(glyph: char) -> Option<Self> {
        match glyph {
            '#' => Some(Self::Wall),
            ' ' => Some(Self::Open),
            '.' => Some(Self::SmallItem),
            'o' => Some(Self::PowerItem),
            'P' => Some(Self::Portal),
            '-' => Some(Self::PenGate),
            '_' => Some(Self::PenInterior),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GhostColor {
    Red,
    Pink,
    Blue,
    Yellow,
}

impl GhostColor {
    pub const ALL: [GhostColor; 4] = [
        GhostColor::Red,
        GhostColor::Pink,
        GhostColor::Blue,
        GhostColor::Yellow,
    ];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GhostMode {
    Pursuit,
    Disperse,
    Vulnerable,
    Captured,
    Departing,
    Penned,
}

/// The global alternation between the two wave-following modes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Wave {
    Pursuit,
    Disperse,
}

impl From<Wave> for GhostMode {
    fn from(wave: Wave) -> Self {
        match wave {
            Wave::Pursuit => GhostMode::Pursuit,
            Wave::Disperse => GhostMode::Disperse,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    Ready,
    Playing,
    EatPause,
    Paused,
    Dying,
    GameOver,
}

/// Abstract input events; device bindings live in the adapters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Turn(Direction),
    Pause,
    Confirm,
}

#[derive(Clone, Debug, Serialize)]
pub struct PlayerView {
    pub x: f32,
    pub y: f32,
    #[serde(rename = "tileX")]
    pub tile_x: i32,
    #[serde(rename = "tileY")]
    pub tile_y: i32,
    pub dir: Direction,
    pub chomping: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct GhostView {
    pub color: GhostColor,
    pub x: f32,
    pub y: f32,
    #[serde(rename = "tileX")]
    pub tile_x: i32,
    #[serde(rename = "tileY")]
    pub tile_y: i32,
    pub dir: Direction,
    pub mode: GhostMode,
    #[serde(rename = "speedPercent")]
    pub speed_percent: i32,
    #[serde(rename = "vulnerableTicks")]
    pub vulnerable_ticks: Option<u32>,
    pub flashing: bool,
    #[serde(rename = "showScore")]
    pub show_score: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RuntimeEvent {
    ModeChanged {
        from: GameMode,
        to: GameMode,
    },
    WaveChanged {
        wave: Wave,
    },
    ItemEaten {
        x: i32,
        y: i32,
        score: u32,
    },
    PowerItemEaten {
        x: i32,
        y: i32,
    },
    GhostReleased {
        color: GhostColor,
    },
    GhostCaptured {
        color: GhostColor,
        score: u32,
    },
    PlayerCaught {
        color: GhostColor,
    },
    VulnerabilityExpired {
        color: GhostColor,
    },
    ExtraLife {
        lives: u32,
    },
    LevelCleared {
        level: u32,
    },
}

#[derive(Clone, Debug, Serialize)]
pub struct Snapshot {
    pub tick: u64,
    pub mode: GameMode,
    pub score: u32,
    pub level: u32,
    pub lives: u32,
    #[serde(rename = "itemsLeft")]
    pub items_left: u32,
    pub wave: Wave,
    #[serde(rename = "capturedCount")]
    pub captured_count: u32,
    pub player: PlayerView,
    pub ghosts: Vec<GhostView>,
    pub events: Vec<RuntimeEvent>,
}
