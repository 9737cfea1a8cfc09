//! Arena of immutable AST nodes addressed by integer id.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct NodeId(pub usize);

impl NodeId {
    /// Reserved id meaning "no node".
    pub const NONE: NodeId = NodeId(0);

    pub fn is_none(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
}

impl ArithOp {
    pub fn symbol(self) -> &'static str {
        match self {
            ArithOp::Add => "+",
            ArithOp::Sub => "-",
            ArithOp::Mul => "*",
            ArithOp::Div => "/",
            ArithOp::Rem => "%",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
}

impl CmpOp {
    pub fn symbol(self) -> &'static str {
        match self {
            CmpOp::Eq => "==",
            CmpOp::Ne => "!=",
            CmpOp::Lt => "<",
            CmpOp::Gt => ">",
            CmpOp::Le => "<=",
            CmpOp::Ge => ">=",
        }
    }
}

/// What a node means, decided once from its tag when the node is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// `;`: left statement, then right statement.
    Sequence,
    If,
    While,
    /// `=`: left is the target identifier, right the value.
    Assign,
    /// `cuerpo`: true branch on the left, false branch on the right.
    Body,
    Arithmetic(ArithOp),
    Comparison(CmpOp),
    Literal,
    Identifier,
}

impl NodeKind {
    pub fn from_tag(tag: &str) -> NodeKind {
        match tag {
            ";" => NodeKind::Sequence,
            "if" => NodeKind::If,
            "while" => NodeKind::While,
            "=" => NodeKind::Assign,
            "cuerpo" => NodeKind::Body,
            "+" => NodeKind::Arithmetic(ArithOp::Add),
            "-" => NodeKind::Arithmetic(ArithOp::Sub),
            "*" => NodeKind::Arithmetic(ArithOp::Mul),
            "/" => NodeKind::Arithmetic(ArithOp::Div),
            "%" => NodeKind::Arithmetic(ArithOp::Rem),
            "==" => NodeKind::Comparison(CmpOp::Eq),
            "!=" => NodeKind::Comparison(CmpOp::Ne),
            "<" => NodeKind::Comparison(CmpOp::Lt),
            ">" => NodeKind::Comparison(CmpOp::Gt),
            "<=" => NodeKind::Comparison(CmpOp::Le),
            ">=" => NodeKind::Comparison(CmpOp::Ge),
            _ if is_numeric_literal(tag) => NodeKind::Literal,
            _ => NodeKind::Identifier,
        }
    }
}

/// A lexeme is a literal when it reads as a finite number, so identifiers
/// such as `inf` or `nan` stay identifiers.
pub fn is_numeric_literal(lexeme: &str) -> bool {
    lexeme
        .trim()
        .parse::<f64>()
        .map(|v| v.is_finite())
        .unwrap_or(false)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: NodeId,
    tag: String,
    kind: NodeKind,
    left: Option<NodeId>,
    right: Option<NodeId>,
}

impl Node {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn left(&self) -> NodeId {
        self.left.unwrap_or(NodeId::NONE)
    }

    pub fn right(&self) -> NodeId {
        self.right.unwrap_or(NodeId::NONE)
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// Append-only node store. Node `n` lives at index `n - 1`.
#[derive(Debug, Clone, Default)]
pub struct Ast {
    nodes: Vec<Node>,
}

impl Ast {
    pub fn new() -> Self {
        Ast { nodes: Vec::new() }
    }

    pub fn leaf(&mut self, tag: &str) -> NodeId {
        self.push(tag, NodeId::NONE, NodeId::NONE)
    }

    pub fn unary(&mut self, tag: &str, child: NodeId) -> NodeId {
        self.push(tag, child, NodeId::NONE)
    }

    pub fn binary(&mut self, tag: &str, left: NodeId, right: NodeId) -> NodeId {
        self.push(tag, left, right)
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        if id.is_none() {
            return None;
        }
        self.nodes.get(id.0 - 1)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    fn push(&mut self, tag: &str, left: NodeId, right: NodeId) -> NodeId {
        let id = NodeId(self.nodes.len() + 1);
        // Unknown children are recorded as absent.
        let left = self.get(left).map(Node::id);
        let right = self.get(right).map(Node::id);
        self.nodes.push(Node {
            id,
            tag: tag.to_string(),
            kind: NodeKind::from_tag(tag),
            left,
            right,
        });
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_start_at_one_and_increase() {
        let mut ast = Ast::new();
        let a = ast.leaf("a");
        let b = ast.leaf("b");
        let sum = ast.binary("+", a, b);
        assert_eq!(a, NodeId(1));
        assert_eq!(b, NodeId(2));
        assert_eq!(sum, NodeId(3));
        assert_eq!(ast.len(), 3);
    }

    #[test]
    fn get_finds_each_node_by_its_own_id() {
        let mut ast = Ast::new();
        let ids: Vec<NodeId> = (0..300).map(|i| ast.leaf(&format!("v{}", i))).collect();
        for (i, id) in ids.iter().enumerate() {
            assert_eq!(id.0, i + 1);
            let node = ast.get(*id).expect("stored node");
            assert_eq!(node.id(), *id);
            assert_eq!(node.tag(), format!("v{}", i));
        }
    }

    #[test]
    fn zero_and_unknown_ids_are_absent() {
        let mut ast = Ast::new();
        ast.leaf("x");
        assert!(ast.get(NodeId::NONE).is_none());
        assert!(ast.get(NodeId(42)).is_none());
    }

    #[test]
    fn unknown_children_are_stored_as_none() {
        let mut ast = Ast::new();
        let x = ast.leaf("x");
        let assign = ast.binary("=", x, NodeId(99));
        let node = ast.get(assign).expect("assignment node");
        assert_eq!(node.left(), x);
        assert_eq!(node.right(), NodeId::NONE);
    }

    #[test]
    fn unary_nodes_only_have_a_left_child() {
        let mut ast = Ast::new();
        let x = ast.leaf("x");
        let u = ast.unary(";", x);
        let node = ast.get(u).expect("unary node");
        assert_eq!(node.left(), x);
        assert!(node.right().is_none());
        assert!(!node.is_leaf());
    }

    #[test]
    fn tags_map_to_kinds() {
        assert_eq!(NodeKind::from_tag(";"), NodeKind::Sequence);
        assert_eq!(NodeKind::from_tag("cuerpo"), NodeKind::Body);
        assert_eq!(NodeKind::from_tag("%"), NodeKind::Arithmetic(ArithOp::Rem));
        assert_eq!(NodeKind::from_tag(">="), NodeKind::Comparison(CmpOp::Ge));
        assert_eq!(NodeKind::from_tag("3.25"), NodeKind::Literal);
        assert_eq!(NodeKind::from_tag("-7"), NodeKind::Literal);
        assert_eq!(NodeKind::from_tag("counter"), NodeKind::Identifier);
        assert_eq!(NodeKind::from_tag("inf"), NodeKind::Identifier);
        assert_eq!(NodeKind::from_tag("nan"), NodeKind::Identifier);
    }
}
