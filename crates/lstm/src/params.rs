//! Network parameters and the Adam optimiser.

use ndarray::{Array, Array1, Array2, Dimension, Zip};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Weights of one LSTM layer with the four gates stacked row-wise.
///
/// Gate order along the first axis is input, forget, candidate, output,
/// each block `hidden` rows tall.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct LayerParams {
    /// Input weights, shape `(4 * hidden, n_in)`.
    pub(crate) w: Array2<f64>,
    /// Recurrent weights, shape `(4 * hidden, hidden)`.
    pub(crate) u: Array2<f64>,
    /// Biases, length `4 * hidden`.
    pub(crate) b: Array1<f64>,
}

impl LayerParams {
    /// Uniform `±1/sqrt(hidden)` weights, zero biases except a forget-gate bias of 1.
    fn init<R: Rng + ?Sized>(n_in: usize, hidden: usize, rng: &mut R) -> Self {
        let limit = 1.0 / (hidden as f64).sqrt();
        let w = Array2::from_shape_fn((4 * hidden, n_in), |_| rng.random_range(-limit..limit));
        let u = Array2::from_shape_fn((4 * hidden, hidden), |_| rng.random_range(-limit..limit));
        let mut b = Array1::zeros(4 * hidden);
        b.slice_mut(ndarray::s![hidden..2 * hidden]).fill(1.0);
        Self { w, u, b }
    }

    fn zeros_like(&self) -> Self {
        Self {
            w: Array2::zeros(self.w.raw_dim()),
            u: Array2::zeros(self.u.raw_dim()),
            b: Array1::zeros(self.b.raw_dim()),
        }
    }

    /// Hidden size of this layer.
    pub(crate) fn hidden(&self) -> usize {
        self.u.ncols()
    }
}

/// All trainable parameters: stacked layers plus a linear output head.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct Params {
    pub(crate) layers: Vec<LayerParams>,
    /// Output weights over the last layer's hidden state.
    pub(crate) head_w: Array1<f64>,
    /// Output bias, length 1.
    pub(crate) head_b: Array1<f64>,
}

impl Params {
    /// Randomly initialises a network with scalar input and scalar output.
    pub(crate) fn init<R: Rng + ?Sized>(hidden_sizes: &[usize], rng: &mut R) -> Self {
        let mut layers = Vec::with_capacity(hidden_sizes.len());
        let mut n_in = 1;
        for &h in hidden_sizes {
            layers.push(LayerParams::init(n_in, h, rng));
            n_in = h;
        }
        let limit = (6.0 / (n_in as f64 + 1.0)).sqrt();
        let head_w = Array1::from_shape_fn(n_in, |_| rng.random_range(-limit..limit));
        Self {
            layers,
            head_w,
            head_b: Array1::zeros(1),
        }
    }

    /// Zero-filled parameters of the same shapes (gradient accumulator).
    pub(crate) fn zeros_like(&self) -> Self {
        Self {
            layers: self.layers.iter().map(LayerParams::zeros_like).collect(),
            head_w: Array1::zeros(self.head_w.raw_dim()),
            head_b: Array1::zeros(1),
        }
    }

    /// Euclidean norm over every parameter.
    pub(crate) fn norm(&self) -> f64 {
        let mut sq = self.head_w.iter().chain(&self.head_b).map(|v| v * v).sum::<f64>();
        for l in &self.layers {
            sq += l.w.iter().chain(&l.u).chain(&l.b).map(|v| v * v).sum::<f64>();
        }
        sq.sqrt()
    }

    /// Multiplies every parameter by `k`.
    pub(crate) fn scale(&mut self, k: f64) {
        for l in &mut self.layers {
            l.w.mapv_inplace(|v| v * k);
            l.u.mapv_inplace(|v| v * k);
            l.b.mapv_inplace(|v| v * k);
        }
        self.head_w.mapv_inplace(|v| v * k);
        self.head_b.mapv_inplace(|v| v * k);
    }
}

/// Adam optimiser state (Kingma & Ba, 2015).
#[derive(Debug, Clone)]
pub(crate) struct Adam {
    learning_rate: f64,
    beta1: f64,
    beta2: f64,
    epsilon: f64,
    t: i32,
    m: Params,
    v: Params,
}

impl Adam {
    pub(crate) fn new(params: &Params, learning_rate: f64) -> Self {
        Self {
            learning_rate,
            beta1: 0.9,
            beta2: 0.999,
            epsilon: 1e-7,
            t: 0,
            m: params.zeros_like(),
            v: params.zeros_like(),
        }
    }

    /// Applies one bias-corrected update of `params` along `grads`.
    pub(crate) fn step(&mut self, params: &mut Params, grads: &Params) {
        self.t += 1;
        let rule = Rule {
            lr: self.learning_rate,
            beta1: self.beta1,
            beta2: self.beta2,
            epsilon: self.epsilon,
            bc1: 1.0 - self.beta1.powi(self.t),
            bc2: 1.0 - self.beta2.powi(self.t),
        };

        let moments = self.m.layers.iter_mut().zip(self.v.layers.iter_mut());
        for ((p, g), (m, v)) in params.layers.iter_mut().zip(&grads.layers).zip(moments) {
            rule.apply(&mut p.w, &g.w, &mut m.w, &mut v.w);
            rule.apply(&mut p.u, &g.u, &mut m.u, &mut v.u);
            rule.apply(&mut p.b, &g.b, &mut m.b, &mut v.b);
        }
        rule.apply(
            &mut params.head_w,
            &grads.head_w,
            &mut self.m.head_w,
            &mut self.v.head_w,
        );
        rule.apply(
            &mut params.head_b,
            &grads.head_b,
            &mut self.m.head_b,
            &mut self.v.head_b,
        );
    }
}

/// Hyper-parameters of a single Adam step.
struct Rule {
    lr: f64,
    beta1: f64,
    beta2: f64,
    epsilon: f64,
    bc1: f64,
    bc2: f64,
}

impl Rule {
    fn apply<D: Dimension>(
        &self,
        p: &mut Array<f64, D>,
        g: &Array<f64, D>,
        m: &mut Array<f64, D>,
        v: &mut Array<f64, D>,
    ) {
        Zip::from(p).and(g).and(m).and(v).for_each(|p, &g, m, v| {
            *m = self.beta1 * *m + (1.0 - self.beta1) * g;
            *v = self.beta2 * *v + (1.0 - self.beta2) * g * g;
            let m_hat = *m / self.bc1;
            let v_hat = *v / self.bc2;
            *p -= self.lr * m_hat / (v_hat.sqrt() + self.epsilon);
        });
    }
}
