use crate::{Edge, NodeId, Sign};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

impl Sign {
    /// The numeric code of this sign: `1` for activation, `0` for inhibition.
    pub fn to_code(self) -> u8 {
        match self {
            Sign::Positive => 1,
            Sign::Negative => 0,
        }
    }

    pub fn from_code(code: u8) -> Result<Sign, String> {
        match code {
            1 => Ok(Sign::Positive),
            0 => Ok(Sign::Negative),
            _ => Err(format!("Invalid edge sign {}. Expected 0 or 1.", code)),
        }
    }

    /// The opposite polarity.
    pub fn flip(self) -> Sign {
        match self {
            Sign::Positive => Sign::Negative,
            Sign::Negative => Sign::Positive,
        }
    }

    /// The value a regulator must have for a term containing it (through an edge
    /// of this sign) to be satisfied.
    pub fn required_value(self) -> bool {
        self == Sign::Positive
    }
}

impl Edge {
    pub fn new(source: NodeId, target: NodeId, sign: Sign) -> Edge {
        Edge {
            source,
            target,
            sign,
            fixed: false,
        }
    }

    pub fn get_source(&self) -> NodeId {
        self.source
    }

    pub fn get_target(&self) -> NodeId {
        self.target
    }

    pub fn get_sign(&self) -> Sign {
        self.sign
    }

    pub fn is_fixed(&self) -> bool {
        self.fixed
    }

    /// A copy of this edge with the opposite sign.
    pub fn flipped(&self) -> Edge {
        Edge {
            sign: self.sign.flip(),
            ..*self
        }
    }

    /// True if this edge connects the same ordered pair of nodes as `other`,
    /// regardless of sign.
    pub fn same_endpoints(&self, other: &Edge) -> bool {
        self.source == other.source && self.target == other.target
    }

    fn key(&self) -> (NodeId, NodeId, Sign) {
        (self.source, self.target, self.sign)
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Edge {}

impl Hash for Edge {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl PartialOrd for Edge {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Edge {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}
