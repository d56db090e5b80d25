//! Interaction state for the map UI.
//!
//! The controller follows the model/message/update shape: every user action
//! or service response arrives as a [`Msg`], [`Model::update`] mutates the
//! owned state and may hand back a [`Command`] the runtime has to perform.
//! The outcome of that command is fed back as [`Msg::RouteFetched`] carrying
//! the command's [`Ticket`], so answers to superseded requests are dropped.

use std::fmt;

use shared::{GeoPoint, PlanRequest, RouteResult};

use crate::error::PlanError;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Mode {
    /// Origin and destination typed as place names.
    #[default]
    Input,
    /// Origin and destination picked on the map.
    Click,
}

/// Progress of a click-mode selection.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub enum Selection {
    #[default]
    Empty,
    OriginSet(GeoPoint),
    Complete {
        origin: GeoPoint,
        destination: GeoPoint,
    },
}

impl Selection {
    pub fn origin(&self) -> Option<GeoPoint> {
        match *self {
            Selection::Empty => None,
            Selection::OriginSet(origin) | Selection::Complete { origin, .. } => Some(origin),
        }
    }

    pub fn destination(&self) -> Option<GeoPoint> {
        match *self {
            Selection::Complete { destination, .. } => Some(destination),
            _ => None,
        }
    }
}

/// Identifies one issued planning request.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Ticket(u64);

/// Something the presentation layer should show the user.
#[derive(Clone, PartialEq, Debug)]
pub enum Notice {
    NoPathFound,
    Failure(String),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::NoPathFound => f.write_str("No paths found"),
            Notice::Failure(message) => f.write_str(message),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MarkerKind {
    Origin,
    Destination,
    PathStart,
    PathEnd,
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Marker {
    pub kind: MarkerKind,
    pub position: GeoPoint,
}

#[derive(Debug)]
pub enum Msg {
    SetMode(Mode),
    Submit { origin: String, destination: String },
    MapClicked(GeoPoint),
    Reset,
    RouteFetched {
        ticket: Ticket,
        result: Result<RouteResult, PlanError>,
    },
}

/// Work the runtime must carry out and answer with [`Msg::RouteFetched`].
#[derive(Debug, Clone)]
pub enum Command {
    Plan { ticket: Ticket, request: PlanRequest },
}

#[derive(Debug, Default)]
pub struct Model {
    mode: Mode,
    selection: Selection,
    loading: bool,
    in_flight: Option<Ticket>,
    issued: u64,
    route: RouteResult,
    notice: Option<Notice>,
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    /// The route currently on display; empty until a request succeeds.
    pub fn route(&self) -> &RouteResult {
        &self.route
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Whether the input form's submit button should be enabled.
    pub fn can_submit(&self) -> bool {
        self.mode == Mode::Input && !self.loading
    }

    /// Markers to draw: the click selection while no route is shown, otherwise
    /// both ends of the primary path.
    pub fn markers(&self) -> Vec<Marker> {
        let mut markers = Vec::new();
        if self.mode == Mode::Click && self.route.primary.is_none() {
            if let Some(position) = self.selection.origin() {
                markers.push(Marker {
                    kind: MarkerKind::Origin,
                    position,
                });
            }
            if let Some(position) = self.selection.destination() {
                markers.push(Marker {
                    kind: MarkerKind::Destination,
                    position,
                });
            }
        }
        if let Some(primary) = &self.route.primary {
            if let (Some(start), Some(end)) = (primary.first(), primary.last()) {
                markers.push(Marker {
                    kind: MarkerKind::PathStart,
                    position: start,
                });
                markers.push(Marker {
                    kind: MarkerKind::PathEnd,
                    position: end,
                });
            }
        }
        markers
    }

    pub fn update(&mut self, msg: Msg) -> Option<Command> {
        match msg {
            Msg::SetMode(mode) => {
                if mode != self.mode {
                    self.clear();
                    self.mode = mode;
                }
                None
            }
            Msg::Reset => {
                self.clear();
                None
            }
            Msg::Submit {
                origin,
                destination,
            } => {
                if !self.can_submit() {
                    tracing::debug!(mode = ?self.mode, loading = self.loading, "submit ignored");
                    return None;
                }
                Some(self.issue(PlanRequest::Queries {
                    origin,
                    destination,
                }))
            }
            Msg::MapClicked(point) => {
                if self.mode != Mode::Click {
                    return None;
                }
                match self.selection {
                    Selection::Empty => {
                        self.selection = Selection::OriginSet(point);
                        None
                    }
                    Selection::OriginSet(origin) => {
                        self.selection = Selection::Complete {
                            origin,
                            destination: point,
                        };
                        Some(self.issue(PlanRequest::Points {
                            origin,
                            destination: point,
                        }))
                    }
                    Selection::Complete { .. } => None,
                }
            }
            Msg::RouteFetched { ticket, result } => {
                if self.in_flight != Some(ticket) {
                    tracing::warn!(?ticket, "dropping response to superseded request");
                    return None;
                }
                self.in_flight = None;
                self.loading = false;
                match result {
                    Ok(route) if route.is_no_path_found() => {
                        self.notice = Some(Notice::NoPathFound);
                    }
                    Ok(route) => {
                        self.route = route;
                        self.notice = None;
                    }
                    Err(err) => {
                        tracing::warn!(kind = err.kind(), "route request failed: {err}");
                        self.notice = Some(Notice::Failure(err.to_string()));
                    }
                }
                None
            }
        }
    }

    /// Releases the loading flag for a request that will never be answered.
    pub fn abandon(&mut self, ticket: Ticket) {
        if self.in_flight == Some(ticket) {
            self.in_flight = None;
            self.loading = false;
        }
    }

    fn issue(&mut self, request: PlanRequest) -> Command {
        self.issued += 1;
        let ticket = Ticket(self.issued);
        self.in_flight = Some(ticket);
        self.loading = true;
        self.notice = None;
        Command::Plan { ticket, request }
    }

    fn clear(&mut self) {
        self.selection = Selection::Empty;
        self.route = RouteResult::default();
        self.in_flight = None;
        self.loading = false;
        self.notice = None;
    }
}
